/// Decode bytes as UTF-8, replacing invalid sequences.
pub fn extract_txt(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
