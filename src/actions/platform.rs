//! Platform-specific "open" command selection.

/// Operating system family, as far as opening things is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Darwin,
    Other,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name (as in `std::env::consts::OS`) to a platform family.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" | "darwin" => Platform::Darwin,
            _ => Platform::Other,
        }
    }

    /// Full argument list that opens `target` with the default handler.
    pub fn open_command(self, target: &str) -> Vec<String> {
        let prefix: &[&str] = match self {
            Platform::Windows => &["cmd", "/C", "start"],
            Platform::Darwin => &["open"],
            Platform::Other => &["xdg-open"],
        };

        prefix
            .iter()
            .map(|s| s.to_string())
            .chain(std::iter::once(target.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_uses_cmd_start() {
        assert_eq!(
            Platform::from_os("windows").open_command("https://example.com"),
            ["cmd", "/C", "start", "https://example.com"]
        );
    }

    #[test]
    fn darwin_uses_open() {
        assert_eq!(Platform::from_os("darwin"), Platform::Darwin);
        assert_eq!(
            Platform::from_os("macos").open_command("https://example.com"),
            ["open", "https://example.com"]
        );
    }

    #[test]
    fn everything_else_uses_xdg_open() {
        for os in ["linux", "freebsd", "openbsd", ""] {
            assert_eq!(
                Platform::from_os(os).open_command("notes.txt"),
                ["xdg-open", "notes.txt"]
            );
        }
    }

    #[test]
    fn target_is_passed_verbatim() {
        let args = Platform::Other.open_command("a b; rm -rf ~");
        assert_eq!(args.last().map(String::as_str), Some("a b; rm -rf ~"));
        assert_eq!(args.len(), 2);
    }
}
