//! Cryptographic utilities for API signing

/// MD5 다이제스트를 소문자 hex 문자열로 반환
pub fn md5_hex(message: &str) -> String {
    format!("{:x}", md5::compute(message.as_bytes()))
}
