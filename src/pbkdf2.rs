use hmac::{
    digest::{InvalidLength, KeyInit, Output, OutputSizeUser},
    Mac,
};

/// The [PBKDF2 key derivation function](https://www.rfc-editor.org/rfc/rfc8018#section-5.2),
/// using the keyed MAC `M` as the pseudorandom function.
///
/// Fills `output` completely; its length is the derived key length. The caller is responsible for
/// keeping `output.len()` within `(2^32 - 1) * hLen` and `iterations` at least 1.
///
/// Returns [`InvalidLength`] if `M` rejects `password` as a key. HMAC never does; fixed-key MACs
/// reject passwords of the wrong length.
pub fn pbkdf2<M>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output: &mut [u8],
) -> Result<(), InvalidLength>
where
    M: Mac + KeyInit + Clone,
{
    let prf = <M as KeyInit>::new_from_slice(password)?;
    let block_len = <M as OutputSizeUser>::output_size();

    for (chunk, index) in output.chunks_mut(block_len).zip(1..=u32::MAX) {
        let block = calculate_block(&prf, salt, iterations, index);
        chunk.copy_from_slice(&block[..chunk.len()]);
    }
    Ok(())
}

/// `F(P, S, c, i) = U_1 ^ U_2 ^ ... ^ U_c`
fn calculate_block<M>(prf: &M, salt: &[u8], iterations: u32, index: u32) -> Output<M>
where
    M: Mac + Clone,
{
    // U_1 = PRF(P, S || INT_32_BE(i))
    let mut mac = prf.clone();
    mac.update(salt);
    mac.update(&index.to_be_bytes());
    let u_1 = mac.finalize().into_bytes();

    // U_j = PRF(P, U_{j-1})
    let (block, _) = (1..iterations).fold((u_1.clone(), u_1), |(mut acc, prev), _| {
        let mut mac = prf.clone();
        mac.update(prev.as_slice());
        let u = mac.finalize().into_bytes();
        acc.iter_mut().zip(u.iter()).for_each(|(a, b)| *a ^= *b);
        (acc, u)
    });
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use hmac::Hmac;
    use sha1::Sha1;
    use sha2::Sha256;

    #[test]
    fn test_fixed_key_mac() {
        use aes::Aes128;
        use cmac::Cmac;

        let mut output = [0u8; 40];
        assert_eq!(
            pbkdf2::<Cmac<Aes128>>(b"password", b"salt", 1, &mut output),
            Err(InvalidLength)
        );
        assert_eq!(output, [0u8; 40]);

        let key = [0x2b; 16];
        pbkdf2::<Cmac<Aes128>>(&key, b"salt", 1, &mut output[..16]).unwrap();

        let mut mac = <Cmac<Aes128> as KeyInit>::new_from_slice(&key).unwrap();
        mac.update(b"salt\x00\x00\x00\x01");
        assert_eq!(&output[..16], mac.finalize().into_bytes().as_slice());
    }

    #[test]
    fn test_hmac_accepts_any_password_length() {
        let mut output = [0u8; 20];
        let passwords: [&[u8]; 4] = [b"", b"p", &[0x58; 64], &[0x58; 200]];
        for password in passwords {
            assert_eq!(pbkdf2::<Hmac<Sha1>>(password, b"salt", 2, &mut output), Ok(()));
        }
    }

    #[test]
    fn test_single_iteration_is_hmac() {
        let mut mac = <Hmac<Sha1> as KeyInit>::new_from_slice(b"password").unwrap();
        mac.update(b"salt\x00\x00\x00\x01");
        let expected = mac.finalize().into_bytes();

        let mut output = [0u8; 20];
        pbkdf2::<Hmac<Sha1>>(b"password", b"salt", 1, &mut output).unwrap();
        assert_eq!(&output[..], expected.as_slice());
    }

    #[test]
    fn test_second_block_uses_next_index() {
        let mut mac = <Hmac<Sha1> as KeyInit>::new_from_slice(b"password").unwrap();
        mac.update(b"salt\x00\x00\x00\x02");
        let expected = mac.finalize().into_bytes();

        let mut output = [0u8; 40];
        pbkdf2::<Hmac<Sha1>>(b"password", b"salt", 1, &mut output).unwrap();
        assert_eq!(&output[20..], expected.as_slice());
    }

    #[test]
    fn test_two_iterations_xor() {
        let prf = <Hmac<Sha256> as KeyInit>::new_from_slice(b"key").unwrap();

        let mut mac = prf.clone();
        mac.update(b"nacl\x00\x00\x00\x01");
        let u_1 = mac.finalize().into_bytes();
        let mut mac = prf.clone();
        mac.update(u_1.as_slice());
        let u_2 = mac.finalize().into_bytes();
        let expected: Vec<u8> = u_1.iter().zip(u_2.iter()).map(|(a, b)| a ^ b).collect();

        let block = calculate_block(&prf, b"nacl", 2, 1);
        assert_eq!(block.as_slice(), &expected[..]);
    }

    #[test]
    fn test_last_block_index() {
        let prf = <Hmac<Sha1> as KeyInit>::new_from_slice(b"password").unwrap();
        let mut mac = prf.clone();
        mac.update(b"salt\xff\xff\xff\xff");
        let expected = mac.finalize().into_bytes();

        assert_eq!(calculate_block(&prf, b"salt", 1, u32::MAX), expected);
        assert_eq!((1..=u32::MAX).nth(u32::MAX as usize - 1), Some(u32::MAX));
    }

    #[test]
    fn test_truncated_output_is_prefix() {
        let mut long = [0u8; 50];
        let mut short = [0u8; 23];
        pbkdf2::<Hmac<Sha256>>(b"password", b"salt", 3, &mut long).unwrap();
        pbkdf2::<Hmac<Sha256>>(b"password", b"salt", 3, &mut short).unwrap();
        assert_eq!(&long[..23], &short[..]);
    }
}
