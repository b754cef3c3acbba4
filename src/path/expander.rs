use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct PathExpander<'a> {
    home: Option<&'a str>,
}

impl<'a> PathExpander<'a> {
    pub fn new(home: Option<&'a str>) -> Self {
        Self { home }
    }

    pub fn expand(&self, path: &str) -> PathBuf {
        match (self.home, path.strip_prefix('~')) {
            (Some(home), Some("")) => PathBuf::from(home),
            (Some(home), Some(rest)) if rest.starts_with('/') => {
                let mut home_path = PathBuf::from(home);
                for part in rest.split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                home_path
            }
            _ => Path::new(path).to_path_buf(),
        }
    }
}
