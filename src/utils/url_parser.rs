/// Extract the `host[:port]` part of a URL for display.
pub fn hostname_from_url(u: &str) -> String {
    let s = u.trim();
    if s.is_empty() {
        return "".into();
    }
    let s = if let Some(idx) = s.find("://") { &s[idx + 3..] } else { s };
    let host = s.split(['/', '?', '#']).next().unwrap_or(s);
    // Never echo embedded credentials.
    let host = host.rsplit('@').next().unwrap_or(host);
    host.to_string()
}

#[cfg(test)]
mod tests {
    use super::hostname_from_url;

    #[test]
    fn test_hostname_from_url() {
        assert_eq!(hostname_from_url("http://localhost:8000"), "localhost:8000");
        assert_eq!(hostname_from_url("https://ems.example.com/api/"), "ems.example.com");
        assert_eq!(hostname_from_url("https://user:pw@ems.example.com"), "ems.example.com");
        assert_eq!(hostname_from_url("ems.internal?x=1"), "ems.internal");
        assert_eq!(hostname_from_url("  "), "");
    }
}
