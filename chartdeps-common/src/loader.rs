// chartdeps-common/src/loader.rs
//! Loads a chart, and every subchart under its `charts/` directory, from either
//! an expanded directory or a gzipped tar archive.
//!
//! Both sources are reduced to the same in-memory file set (relative path with
//! `/` separators -> bytes) before the chart tree is built, so a chart loads the
//! same way whichever form it is in. Only `Chart.yaml` files and `.tgz`
//! archives are kept; nothing else is needed to build the tree.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ChartDepsError, Result};
use crate::model::chart::{Chart, ChartMetadata};

pub const CHART_FILE: &str = "Chart.yaml";
pub const CHARTS_DIR: &str = "charts";
pub const ARCHIVE_EXTENSION: &str = "tgz";

type ChartFiles = BTreeMap<String, Vec<u8>>;

enum SubchartSource {
    Directory(ChartFiles),
    Archive(Vec<u8>),
}

/// Loads the chart at `path`, which may be a chart directory or a `.tgz` file.
pub fn load(path: &Path) -> Result<Chart> {
    let origin = path.display().to_string();
    let metadata = fs::metadata(path).map_err(|e| ChartDepsError::ChartLoad(origin.clone(), e.to_string()))?;
    if metadata.is_dir() {
        load_dir(path)
    } else {
        let bytes = fs::read(path)?;
        load_archive(&bytes, &origin)
    }
}

pub fn load_dir(dir: &Path) -> Result<Chart> {
    let origin = dir.display().to_string();
    debug!("Loading chart directory {}", origin);
    let mut files = ChartFiles::new();
    for entry_res in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry_res {
            Ok(entry) => entry,
            Err(e) => {
                return Err(ChartDepsError::ChartLoad(origin, e.to_string()));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let Some(key) = relative_key(relative) else {
            warn!("Skipping unrepresentable path {}", entry.path().display());
            continue;
        };
        if is_wanted(&key) {
            files.insert(key, fs::read(entry.path())?);
        }
    }
    load_files(files, &origin)
}

/// Loads a chart from the bytes of a `.tgz` archive. The archive's single
/// top-level directory is stripped.
pub fn load_archive(bytes: &[u8], origin: &str) -> Result<Chart> {
    debug!("Loading chart archive {}", origin);
    let load_err = |e: std::io::Error| ChartDepsError::ChartLoad(origin.to_string(), e.to_string());

    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut files = ChartFiles::new();
    for entry_res in archive.entries().map_err(load_err)? {
        let mut entry = entry_res.map_err(load_err)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path().map_err(load_err)?.into_owned();
        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ChartDepsError::ChartLoad(
                origin.to_string(),
                format!("illegal path in archive: {}", path.display()),
            ));
        }
        // Drop the top-level chart directory.
        let stripped: std::path::PathBuf = path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .skip(1)
            .collect();
        let Some(key) = relative_key(&stripped) else {
            continue;
        };
        if !is_wanted(&key) {
            continue;
        }
        let mut data = Vec::new();
        entry.read_to_end(&mut data).map_err(load_err)?;
        files.insert(key, data);
    }
    load_files(files, origin)
}

fn load_files(files: ChartFiles, origin: &str) -> Result<Chart> {
    let raw = files.get(CHART_FILE).ok_or_else(|| {
        ChartDepsError::ChartLoad(origin.to_string(), format!("{CHART_FILE} file is missing"))
    })?;
    let metadata: ChartMetadata = serde_yaml::from_slice(raw)
        .map_err(|e| ChartDepsError::ChartLoad(origin.to_string(), format!("{CHART_FILE}: {e}")))?;
    metadata.validate().map_err(|e| match e {
        ChartDepsError::ChartLoad(_, msg) => ChartDepsError::ChartLoad(origin.to_string(), msg),
        other => other,
    })?;

    let mut subcharts: BTreeMap<String, SubchartSource> = BTreeMap::new();
    let prefix = format!("{CHARTS_DIR}/");
    for (key, data) in files.iter() {
        let Some(rest) = key.strip_prefix(&prefix) else {
            continue;
        };
        match rest.split_once('/') {
            Some((dir_name, inner)) => {
                let source = subcharts
                    .entry(dir_name.to_string())
                    .or_insert_with(|| SubchartSource::Directory(ChartFiles::new()));
                match source {
                    SubchartSource::Directory(sub_files) => {
                        sub_files.insert(inner.to_string(), data.clone());
                    }
                    SubchartSource::Archive(_) => {
                        warn!("{}: '{}' is both an archive and a directory", origin, dir_name);
                    }
                }
            }
            None if is_archive_name(rest) => {
                subcharts.insert(rest.to_string(), SubchartSource::Archive(data.clone()));
            }
            None => {}
        }
    }

    let mut chart = Chart::new(metadata);
    for (name, source) in subcharts {
        let sub_origin = format!("{origin}/{CHARTS_DIR}/{name}");
        let subchart = match source {
            SubchartSource::Directory(sub_files) => load_files(sub_files, &sub_origin)?,
            SubchartSource::Archive(bytes) => load_archive(&bytes, &sub_origin)?,
        };
        debug!(
            "{}: loaded subchart {} {}",
            chart.name(),
            subchart.name(),
            subchart.version()
        );
        chart.dependencies.push(subchart);
    }
    Ok(chart)
}

fn relative_key(path: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = path
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    parts.filter(|p| !p.is_empty()).map(|p| p.join("/"))
}

fn is_archive_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == ARCHIVE_EXTENSION)
}

fn is_wanted(key: &str) -> bool {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    file_name == CHART_FILE || (key.starts_with("charts/") && is_archive_name(file_name))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    fn chart_yaml(name: &str, version: &str) -> String {
        format!("apiVersion: v2\nname: {name}\nversion: {version}\n")
    }

    fn write_chart_dir(root: &Path, name: &str, version: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("templates")).unwrap();
        fs::write(dir.join(CHART_FILE), chart_yaml(name, version)).unwrap();
        fs::write(dir.join("templates/deploy.yaml"), "kind: Deployment\n").unwrap();
        dir
    }

    /// Builds `<name>-<version>.tgz` bytes holding `<name>/Chart.yaml` plus `extra`.
    fn archive_bytes(name: &str, version: &str, extra: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut add = |path: String, data: &[u8]| {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, data).unwrap();
        };
        add(format!("{name}/{CHART_FILE}"), chart_yaml(name, version).as_bytes());
        for (path, data) in extra {
            add(format!("{name}/{path}"), data);
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn loads_directory_with_expanded_and_packaged_subcharts() {
        let tmp = tempfile::tempdir().unwrap();
        let parent = write_chart_dir(tmp.path(), "parent", "1.0.0");
        let charts = parent.join(CHARTS_DIR);
        fs::create_dir_all(&charts).unwrap();
        write_chart_dir(&charts, "redis", "6.2.1");
        fs::write(charts.join("mysql-8.0.0.tgz"), archive_bytes("mysql", "8.0.0", &[])).unwrap();

        let chart = load(&parent).unwrap();
        assert_eq!(chart.name(), "parent");
        let names: Vec<_> = chart.dependencies().iter().map(|c| (c.name(), c.version())).collect();
        assert_eq!(names, vec![("mysql", "8.0.0"), ("redis", "6.2.1")]);
    }

    #[test]
    fn loads_packaged_chart_with_nested_subcharts() {
        let nested = archive_bytes("mysql", "8.0.0", &[]);
        let bytes = archive_bytes(
            "parent",
            "2.1.8",
            &[
                ("charts/mysql-8.0.0.tgz", nested),
                ("charts/redis/Chart.yaml", chart_yaml("redis", "6.2.1").into_bytes()),
                ("templates/svc.yaml", b"kind: Service\n".to_vec()),
            ],
        );
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("parent-2.1.8.tgz");
        fs::write(&path, bytes).unwrap();

        let chart = load(&path).unwrap();
        assert_eq!(chart.version(), "2.1.8");
        assert_eq!(chart.dependencies().len(), 2);
        assert!(chart.find_dependency("redis").is_some());
        assert_eq!(chart.find_dependency("mysql").unwrap().version(), "8.0.0");
    }

    #[test]
    fn missing_chart_file_is_a_load_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, ChartDepsError::ChartLoad(_, ref msg) if msg.contains("missing")));
    }

    #[test]
    fn nonexistent_path_is_a_load_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&tmp.path().join("absent")),
            Err(ChartDepsError::ChartLoad(_, _))
        ));
    }

    #[test]
    fn corrupt_subchart_archive_fails_the_whole_load() {
        let tmp = tempfile::tempdir().unwrap();
        let parent = write_chart_dir(tmp.path(), "parent", "1.0.0");
        fs::create_dir_all(parent.join(CHARTS_DIR)).unwrap();
        fs::write(parent.join("charts/broken-1.0.0.tgz"), b"not gzip").unwrap();
        assert!(load(&parent).is_err());
    }

    #[test]
    fn wanted_keys() {
        assert!(is_wanted("Chart.yaml"));
        assert!(is_wanted("charts/a/Chart.yaml"));
        assert!(is_wanted("charts/a-1.0.0.tgz"));
        assert!(!is_wanted("templates/a.tgz"));
        assert!(!is_wanted("values.yaml"));
    }
}
