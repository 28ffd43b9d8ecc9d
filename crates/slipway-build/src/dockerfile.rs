use slipway_core::{Config, Tech};

/// Produces a textual container build recipe from a [`Config`] (C4).
///
/// Invariants enforced by every branch: manifest/dependency files are
/// copied and installed before the rest of the tree (layer-cache
/// locality), `config.port` is exposed, every entry of
/// `config.environment` becomes a runtime `ENV`, and `config.install_path`
/// is the working directory.
pub struct DockerfileGenerator<'a> {
    config: &'a Config,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn render(&self) -> String {
        match self.config.tech {
            Tech::Nodejs => self.render_nodejs(),
            Tech::Python => self.render_python(),
            Tech::Go => self.render_go(),
            Tech::Static => self.render_static(),
            Tech::Unknown => self.render_unknown(),
        }
    }

    fn env_directives(&self) -> String {
        let mut entries: Vec<_> = self.config.environment.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(k, v)| format!("ENV {k}={v}\n"))
            .collect()
    }

    fn render_nodejs(&self) -> String {
        format!(
            r#"FROM node:18
WORKDIR {install_path}
COPY package*.json ./
RUN npm ci --only=production
COPY . .
{env}EXPOSE {port}
CMD {start}
"#,
            install_path = self.config.install_path,
            env = self.env_directives(),
            port = self.config.port,
            start = shell_cmd(&self.config.start_command),
        )
    }

    fn render_python(&self) -> String {
        let install_step = if self.config.build_command.as_deref() == Some("pip install .") {
            "COPY . .\nRUN pip install --no-cache-dir .\n".to_owned()
        } else {
            "COPY requirements*.txt pyproject.toml* ./\nRUN pip install --no-cache-dir -r requirements.txt || true\nCOPY . .\n".to_owned()
        };

        format!(
            r#"FROM python:3.11-slim
WORKDIR {install_path}
{install_step}{env}EXPOSE {port}
CMD {start}
"#,
            install_path = self.config.install_path,
            install_step = install_step,
            env = self.env_directives(),
            port = self.config.port,
            start = shell_cmd(&self.config.start_command),
        )
    }

    fn render_go(&self) -> String {
        format!(
            r#"FROM golang:1.21-alpine
WORKDIR {install_path}
COPY go.mod go.sum* ./
RUN go mod download
COPY . .
RUN go build -o app .
{env}EXPOSE {port}
CMD {start}
"#,
            install_path = self.config.install_path,
            env = self.env_directives(),
            port = self.config.port,
            start = shell_cmd(&self.config.start_command),
        )
    }

    fn render_static(&self) -> String {
        format!(
            r#"FROM nginx:alpine
COPY . {install_path}
{env}EXPOSE {port}
CMD ["nginx", "-g", "daemon off;"]
"#,
            install_path = self.config.install_path,
            env = self.env_directives(),
            port = self.config.port,
        )
    }

    fn render_unknown(&self) -> String {
        format!(
            r#"FROM alpine:latest
WORKDIR {install_path}
COPY . .
{env}EXPOSE {port}
CMD {start}
"#,
            install_path = self.config.install_path,
            env = self.env_directives(),
            port = self.config.port,
            start = shell_cmd(&self.config.start_command),
        )
    }
}

/// Renders a shell command as a Dockerfile shell-form CMD, falling back to
/// a sleep loop when the command is empty (the `static` recipe never uses
/// this, but other techs always carry a non-empty `start_command`).
fn shell_cmd(command: &str) -> String {
    if command.is_empty() {
        "[\"sh\", \"-c\", \"true\"]".to_owned()
    } else {
        format!("[\"sh\", \"-c\", \"{}\"]", command.replace('"', "\\\""))
    }
}
