/// Every accepted video link starts with exactly this text.
pub const VIDEO_URL_PREFIX: &str = "https://www.bilibili.com/video";

/// Shallow format check: a plain prefix test, no URL parsing.
pub fn is_valid_video_url(url: &str) -> bool {
    url.starts_with(VIDEO_URL_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::is_valid_video_url;

    #[test]
    fn accepts_prefix_with_and_without_suffix() {
        assert!(is_valid_video_url("https://www.bilibili.com/video"));
        assert!(is_valid_video_url(
            "https://www.bilibili.com/video/BV1THstzuEZ9/?spm_id_from=333.1007"
        ));
    }

    #[test]
    fn rejects_near_misses() {
        assert!(!is_valid_video_url(""));
        assert!(!is_valid_video_url("http://www.bilibili.com/video/BV1"));
        assert!(!is_valid_video_url("https://bilibili.com/video/BV1"));
        assert!(!is_valid_video_url(" https://www.bilibili.com/video/BV1"));
        assert!(!is_valid_video_url("HTTPS://WWW.BILIBILI.COM/VIDEO/BV1"));
    }
}
