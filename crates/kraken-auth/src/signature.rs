//! Kraken `API-Sign` computation

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

/// Sign a private request
///
/// Kraken signature algorithm:
/// 1. SHA256(nonce + POST_data)
/// 2. HMAC-SHA512(secret, uri_path + SHA256_result)
/// 3. Base64 encode result
///
/// # Arguments
/// * `path` - Exact request path, version segment included (e.g., "/0/private/Balance")
/// * `post_data` - URL-encoded POST body, `nonce` key included
/// * `nonce` - The nonce carried in `post_data`
/// * `secret` - Base64-decoded private key
///
/// # Returns
/// Base64-encoded signature
pub fn sign(path: &str, post_data: &str, nonce: &str, secret: &[u8]) -> String {
    let mut sha256 = Sha256::new();
    sha256.update(nonce.as_bytes());
    sha256.update(post_data.as_bytes());
    let digest = sha256.finalize();

    let mut mac = HmacSha512::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(path.as_bytes());
    mac.update(&digest);

    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str =
        "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

    fn secret() -> Vec<u8> {
        BASE64.decode(SECRET).unwrap()
    }

    #[test]
    fn test_kraken_documentation_vector() {
        let signature = sign(
            "/0/private/AddOrder",
            "nonce=1616492376594&ordertype=limit&pair=XBTUSD&price=37500&type=buy&volume=1.25",
            "1616492376594",
            &secret(),
        );

        assert_eq!(
            signature,
            "4/dpxb3iT4tp/ZCVEwSnEsLxx0bqyhLpdfOpc6fn7OR8+UClSV5n9E6aSS8MPtnRfp32bAb0nmbRn6H8ndwLUQ=="
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = sign("/0/private/Balance", "nonce=1", "1", &secret());
        let b = sign("/0/private/Balance", "nonce=1", "1", &secret());
        assert_eq!(a, b);

        // HMAC-SHA512 output is 64 bytes
        assert_eq!(BASE64.decode(&a).unwrap().len(), 64);
    }

    #[test]
    fn test_single_byte_changes_alter_signature() {
        let secret = secret();
        let base = sign("/0/private/Balance", "nonce=1000", "1000", &secret);

        assert_ne!(base, sign("/0/private/Balancf", "nonce=1000", "1000", &secret));
        assert_ne!(base, sign("/0/private/Balance", "nonce=1001", "1000", &secret));
        assert_ne!(base, sign("/0/private/Balance", "nonce=1000", "1001", &secret));

        let mut other_secret = secret.clone();
        other_secret[0] ^= 0x01;
        assert_ne!(base, sign("/0/private/Balance", "nonce=1000", "1000", &other_secret));
    }

    #[test]
    fn test_path_is_not_normalized() {
        let secret = secret();
        assert_ne!(
            sign("/0/private/Balance", "nonce=1", "1", &secret),
            sign("/0/private/Balance/", "nonce=1", "1", &secret)
        );
    }

    #[test]
    fn test_empty_secret_still_signs() {
        let signature = sign("/0/private/Balance", "nonce=1", "1", &[]);
        assert!(BASE64.decode(signature).is_ok());
    }
}
