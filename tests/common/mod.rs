use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_DIR_ID: AtomicUsize = AtomicUsize::new(1);

// Tests run in parallel threads, and possibly in parallel processes, so
// include both in the name.
fn test_temp_dir_path() -> PathBuf {
    let tmpdir = std::env::temp_dir();
    let pid = std::process::id();

    loop {
        let val = NEXT_DIR_ID.fetch_add(1, Ordering::Relaxed);
        if val >= 1000000 {
            panic!("Could not create temp directory path that does not already exist");
        }
        let path = tmpdir.join(format!("ifta-test-{pid}-{val}"));
        if !path.exists() {
            return path;
        }
    }
}

/// A temp dir path which is removed when dropped. The directory itself is
/// not created, which lets tests check that the code under test creates it.
pub struct NonAutoCreatingTestDir {
    pub path: PathBuf,
}

impl NonAutoCreatingTestDir {
    pub fn new() -> NonAutoCreatingTestDir {
        NonAutoCreatingTestDir { path: test_temp_dir_path() }
    }
}

fn cleanup_test_dir(path: &PathBuf) {
    if !path.exists() {
        return;
    }
    let skip_env_var = "SKIP_TEMP_DIR_CLEANUP_ON_FAIL";
    let skip_del_on_fail = ifta::util::sys::env_var_non_empty(skip_env_var);

    if std::thread::panicking() && skip_del_on_fail {
        println!("cleanup_test_dir: panicking. Skipping remove of {}", path.display());
    } else {
        println!("cleanup_test_dir: removing {}. To skip cleanup, set {}",
                 path.display(), skip_env_var);
        let _ = fs::remove_dir_all(path);
    }
}

impl Drop for NonAutoCreatingTestDir {
    fn drop(&mut self) {
        cleanup_test_dir(&self.path);
    }
}
