use std::path::Path;

/// Tars a build context directory in memory for `docker build`'s streaming
/// API. Uncompressed — bollard sends the tar directly as the build context.
pub fn tar_directory(dir: &Path) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut builder = tar::Builder::new(&mut buffer);
        builder.append_dir_all(".", dir)?;
        builder.finish()?;
    }
    Ok(buffer)
}
