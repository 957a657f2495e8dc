//! Retrieval URLs for stored files.

use campus_core::constants::{
    MISSING_FILENAME_SENTINELS, UPLOADS_DIRECT_PATH, UPLOAD_FILE_PROXY_PATH,
};
use campus_core::{ClientConfig, UploadCategory, UrlMode};

/// Builds the URL a stored file can be fetched from, or the placeholder when
/// there is no usable filename.
#[derive(Clone, Debug)]
pub struct FileUrlResolver {
    mode: UrlMode,
    uploads_base: String,
    api_base: String,
    placeholder: String,
}

impl FileUrlResolver {
    pub fn new(
        mode: UrlMode,
        uploads_base: impl Into<String>,
        api_base: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            uploads_base: uploads_base.into().trim_end_matches('/').to_string(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.url_mode,
            config.uploads_url.clone(),
            config.api_url.clone(),
            config.placeholder_url.clone(),
        )
    }

    pub fn mode(&self) -> UrlMode {
        self.mode
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Resolve `filename` in `category`. Missing names, blank names and the
    /// literal strings `null`/`undefined` resolve to the placeholder.
    pub fn resolve(&self, filename: Option<&str>, category: &UploadCategory) -> String {
        let filename = match filename {
            Some(name) if !Self::is_missing_filename(name) => name.trim(),
            _ => return self.placeholder.clone(),
        };

        // Both segments are user-supplied; neither may end the path early.
        let category = urlencoding::encode(category.as_str());
        let filename = urlencoding::encode(filename);
        match self.mode {
            UrlMode::Direct => format!(
                "{}{}/{}/{}",
                self.uploads_base, UPLOADS_DIRECT_PATH, category, filename
            ),
            UrlMode::ApiProxy => format!(
                "{}{}/{}/{}",
                self.api_base, UPLOAD_FILE_PROXY_PATH, category, filename
            ),
        }
    }

    pub fn is_missing_filename(name: &str) -> bool {
        let trimmed = name.trim();
        trimmed.is_empty() || MISSING_FILENAME_SENTINELS.contains(&trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(mode: UrlMode) -> FileUrlResolver {
        FileUrlResolver::new(
            mode,
            "https://school.example/",
            "https://school.example/api",
            "/images/placeholder.jpg",
        )
    }

    fn faculty() -> UploadCategory {
        UploadCategory::new("faculty").unwrap()
    }

    #[test]
    fn direct_mode_points_at_uploads_root() {
        let url = resolver(UrlMode::Direct).resolve(Some("1700-jane.png"), &faculty());
        assert_eq!(url, "https://school.example/uploads/faculty/1700-jane.png");
    }

    #[test]
    fn proxy_mode_goes_through_api() {
        let url = resolver(UrlMode::ApiProxy).resolve(Some("1700-jane.png"), &faculty());
        assert_eq!(
            url,
            "https://school.example/api/upload/file/faculty/1700-jane.png"
        );
    }

    #[test]
    fn filename_is_percent_encoded() {
        let url = resolver(UrlMode::Direct).resolve(Some("annual report #2.pdf"), &faculty());
        assert_eq!(
            url,
            "https://school.example/uploads/faculty/annual%20report%20%232.pdf"
        );
    }

    #[test]
    fn category_is_percent_encoded() {
        let category = UploadCategory::new("news events?x").unwrap();
        assert_eq!(
            resolver(UrlMode::Direct).resolve(Some("a.png"), &category),
            "https://school.example/uploads/news%20events%3Fx/a.png"
        );
        let category = UploadCategory::new("open#day").unwrap();
        assert_eq!(
            resolver(UrlMode::ApiProxy).resolve(Some("a.png"), &category),
            "https://school.example/api/upload/file/open%23day/a.png"
        );
    }

    #[test]
    fn missing_names_resolve_to_placeholder() {
        let r = resolver(UrlMode::Direct);
        for name in [None, Some(""), Some("   "), Some("null"), Some("undefined")] {
            assert_eq!(r.resolve(name, &faculty()), "/images/placeholder.jpg");
        }
    }

    #[test]
    fn sentinel_check_is_exact() {
        assert!(FileUrlResolver::is_missing_filename(" null "));
        assert!(!FileUrlResolver::is_missing_filename("null.png"));
        assert!(!FileUrlResolver::is_missing_filename("Undefined"));
    }

    #[test]
    fn from_config_uses_configured_mode_and_placeholder() {
        let mut config = ClientConfig::for_api_url("http://localhost:5000/api");
        config.url_mode = UrlMode::ApiProxy;
        config.placeholder_url = "/img/none.png".to_string();
        let r = FileUrlResolver::from_config(&config);
        assert_eq!(r.mode(), UrlMode::ApiProxy);
        assert_eq!(r.resolve(Some("undefined"), &faculty()), "/img/none.png");
        assert_eq!(
            r.resolve(Some("a.png"), &faculty()),
            "http://localhost:5000/api/upload/file/faculty/a.png"
        );
    }
}
