//! `kdl init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::KdlManifest;

const SAMPLE_LISTING: &str = r#"[[type]]
name = "Greeting"
code = "STR "
fields = [{ name = "text", kind = "pstring" }]

[[resource]]
type = "Greeting"
id = 128
name = "Hello"
values = { text = "Hello, world" }
"#;

/// Create a new project directory `name` relative to cwd.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("src")).context("creating src/ directory")?;
    fs::create_dir_all(project_dir.join("out")).context("creating out/ directory")?;

    fs::write(project_dir.join("kdl.toml"), KdlManifest::template(name))
        .context("writing kdl.toml")?;
    fs::write(project_dir.join("src").join("main.kdl"), SAMPLE_LISTING)
        .context("writing src/main.kdl")?;
    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/kdl.toml");
    println!("  {name}/src/main.kdl");
    println!("  {name}/out/");

    Ok(())
}
