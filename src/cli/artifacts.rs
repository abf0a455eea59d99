use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use otter_bmc::encoding::Encoding;

/// The paths of the CNF and activation map artifacts of an input, at a bound.
pub fn artifact_paths(input: &Path, output_dir: &Path, bound: usize) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    (
        output_dir.join(format!("{stem}_k{bound}.cnf")),
        output_dir.join(format!("{stem}_k{bound}.assumptions")),
    )
}

/// Writes the CNF and activation map of an encoding, returning the paths written to.
pub fn write_artifacts(
    encoding: &Encoding,
    input: &Path,
    output_dir: &Path,
) -> std::io::Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir)?;
    let (cnf_path, map_path) = artifact_paths(input, output_dir, encoding.bound());

    encoding.write_dimacs(BufWriter::new(File::create(&cnf_path)?))?;
    encoding.write_activation_map(BufWriter::new(File::create(&map_path)?))?;

    Ok((cnf_path, map_path))
}

#[cfg(test)]
mod tests {
    use super::artifact_paths;
    use std::path::{Path, PathBuf};

    #[test]
    fn paths() {
        let (cnf, map) = artifact_paths(Path::new("models/lift.json"), Path::new("out"), 4);
        assert_eq!(cnf, PathBuf::from("out/lift_k4.cnf"));
        assert_eq!(map, PathBuf::from("out/lift_k4.assumptions"));
    }
}
