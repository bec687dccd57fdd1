use std::path::{Path, PathBuf};

pub fn out_cfg(work_dir: impl AsRef<Path>, name: &str) -> PathBuf {
    PathBuf::from(work_dir.as_ref()).join(format!("{name}_manipulated.cfg"))
}

/// Default output path for `input`: a sibling named `<stem>_manipulated.cfg`.
pub fn default_output(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "macro".to_string());
    let work_dir = input.parent().unwrap_or_else(|| Path::new(""));
    out_cfg(work_dir, &name)
}
