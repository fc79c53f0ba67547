pub mod ip;
pub mod password;

pub use ip::is_valid_address;

/// 生成 URL 安全的随机 token（Base64，无填充）
pub fn generate_secure_token(bytes_len: usize) -> String {
    use base64::Engine;
    use rand::RngExt;

    let mut bytes = vec![0u8; bytes_len];
    rand::rng().fill(bytes.as_mut_slice());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
