use std::path::{Component, Path, PathBuf};

/// Renders a path for diagnostics, preferring its canonical form and falling
/// back to a lexically normalized absolute path for entries that do not exist
/// (yet, or anymore).
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        match self.canonicalize() {
            Ok(canonical) => canonical.display().to_string(),
            Err(_) => {
                let absolute = if self.is_absolute() {
                    self.to_path_buf()
                } else {
                    std::env::current_dir()
                        .map(|cwd| cwd.join(self))
                        .unwrap_or_else(|_| self.to_path_buf())
                };
                normalize(&absolute).display().to_string()
            }
        }
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        self.as_path().best_effort_path_display()
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(components.last(), None | Some(Component::RootDir)) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}
