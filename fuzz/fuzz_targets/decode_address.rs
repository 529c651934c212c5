extern crate dual_address;

use dual_address::bech32;

fn do_test(data: &[u8]) {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    if let Ok((hrp, payload)) = bech32::decode(s) {
        let reser = bech32::encode(&hrp, &payload).unwrap();
        assert_eq!(s.to_ascii_lowercase(), reser);
    }

    let parsed = dual_address::parse_address(s, "rai");
    if let Some(ref evm) = parsed.evm_address {
        let cosmos = parsed.cosmos_address.as_ref().unwrap();
        assert_eq!(&dual_address::cosmos_to_evm_address(cosmos).unwrap(), evm);
    }
    let _ = dual_address::detect_search_input_type(s);
}

#[cfg(feature = "afl")]
extern crate afl;
#[cfg(feature = "afl")]
fn main() {
    afl::read_stdio_bytes(|data| {
        do_test(&data);
    });
}

#[cfg(feature = "honggfuzz")]
#[macro_use] extern crate honggfuzz;
#[cfg(feature = "honggfuzz")]
fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}

#[cfg(not(any(feature = "afl", feature = "honggfuzz")))]
fn main() {}
