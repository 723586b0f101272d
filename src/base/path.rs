//! File path helpers shared by the model and the renderers.

/// Normalize separators to `/` and collapse repeated separators.
pub fn unify_file_path(path: &str) -> String {
    let mut unified = String::with_capacity(path.len());
    let mut last_was_separator = false;
    for c in path.chars() {
        let is_separator = c == '/' || c == '\\';
        if is_separator {
            if !last_was_separator {
                unified.push('/');
            }
        } else {
            unified.push(c);
        }
        last_was_separator = is_separator;
    }
    unified
}

/// The component after the last `/`, or the whole path when there is none.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Turn a path into a single file-name stem usable for split output.
///
/// `sub/dir/test.cpp` becomes `sub_dir_test_cpp`.
pub fn flatten_file_path(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '.' | '/' | '\\' | ':' => '_',
            _ => c,
        })
        .collect()
}
