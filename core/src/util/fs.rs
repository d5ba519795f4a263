use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

/// Replace `path` with `data` so that readers observe either the old or the new
/// content, never a partial write.
///
/// The temp file lives in the same directory so the final `rename` stays on one
/// filesystem.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let tmp = dir.join(format!(".{}.tmp", uuid::Uuid::new_v4()));
    let result = (|| -> anyhow::Result<()> {
        let mut f = fs::File::create(&tmp)
            .with_context(|| format!("failed to create {}", tmp.display()))?;
        f.write_all(data)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        f.sync_all()?;
        fs::rename(&tmp, path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

pub fn write_atomic_str(path: &Path, data: &str) -> anyhow::Result<()> {
    write_atomic(path, data.as_bytes())
}

/// [`write_atomic`] on the blocking pool, for async handlers.
pub async fn write_atomic_async(path: &Path, data: impl Into<Vec<u8>>) -> anyhow::Result<()> {
    let path = path.to_path_buf();
    let data = data.into();
    tokio::task::spawn_blocking(move || write_atomic(&path, &data))
        .await
        .context("atomic write task panicked")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "a much longer previous value").unwrap();

        write_atomic_str(&path, "7").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "7");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_atomic_str(&path, "hello").unwrap();

        let names: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["out.txt".to_string()]);
    }

    #[tokio::test]
    async fn async_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        write_atomic_async(&path, "new".to_string()).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn async_write_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_atomic_async(&blocker.join("out.txt"), "x")
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to create"));
    }
}
