use std::path::Path;

use slipway_core::{Config, Tech};

use crate::detectors::Detector;
use crate::error::Result;
use crate::fs_utils;

const DEFAULT_PORT: u16 = 8000;
const ENTRY_FILES: &[&str] = &["app.py", "main.py", "server.py", "manage.py"];

pub struct PythonDetector;

impl Detector for PythonDetector {
    fn name(&self) -> &'static str {
        "python"
    }

    fn can_handle(&self, root: &Path) -> bool {
        fs_utils::first_existing(
            root,
            &["requirements.txt", "pyproject.toml", "setup.py", "Pipfile"],
        )
        .is_some()
            || ENTRY_FILES.iter().any(|f| fs_utils::exists(root, f))
    }

    fn get_config(&self, root: &Path) -> Result<Config> {
        let build_command = build_command(root)?;
        let requirements = requirements_text(root)?;
        let entry = ENTRY_FILES
            .iter()
            .find(|f| fs_utils::exists(root, f))
            .copied();

        let start_command = start_command(requirements.as_deref(), entry);

        let mut environment = std::collections::HashMap::new();
        environment.insert("PYTHONUNBUFFERED".to_owned(), "1".to_owned());

        Ok(Config {
            tech: Tech::Python,
            build_command: Some(build_command),
            start_command,
            port: DEFAULT_PORT,
            environment,
            install_path: "/app".to_owned(),
            raw_detector: self.name().to_owned(),
        })
    }
}

fn build_command(root: &Path) -> Result<String> {
    Ok(if fs_utils::exists(root, "requirements.txt") {
        "pip install -r requirements.txt".to_owned()
    } else if fs_utils::exists(root, "pyproject.toml") {
        "pip install .".to_owned()
    } else if fs_utils::exists(root, "setup.py") {
        "pip install .".to_owned()
    } else if fs_utils::exists(root, "Pipfile") {
        "pipenv install".to_owned()
    } else {
        "pip install -r requirements.txt".to_owned()
    })
}

fn requirements_text(root: &Path) -> Result<Option<String>> {
    let path = root.join("requirements.txt");
    if path.is_file() {
        Ok(Some(fs_utils::read_to_string(&path)?))
    } else {
        Ok(None)
    }
}

/// Dependency hints (Django/Flask/FastAPI/Uvicorn) pick the run mechanism;
/// a present entry file supplies the module name plugged into it.
fn start_command(requirements: Option<&str>, entry: Option<&&str>) -> String {
    let module = entry
        .map(|f| f.trim_end_matches(".py"))
        .unwrap_or("main");

    if let Some(reqs) = requirements {
        if fs_utils::contains_dependency(reqs, "uvicorn") || fs_utils::contains_dependency(reqs, "fastapi") {
            return format!("uvicorn {module}:app --host 0.0.0.0 --port {DEFAULT_PORT}");
        }
        if fs_utils::contains_dependency(reqs, "django") {
            return format!("python manage.py runserver 0.0.0.0:{DEFAULT_PORT}");
        }
        if fs_utils::contains_dependency(reqs, "flask") {
            return match entry {
                Some(f) => format!("python {f}"),
                None => format!("flask run --host=0.0.0.0 --port={DEFAULT_PORT}"),
            };
        }
    }

    match entry {
        Some(f) => format!("python {f}"),
        None => "python app.py".to_owned(),
    }
}
