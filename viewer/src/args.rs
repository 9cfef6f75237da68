use std::path::PathBuf;

use clap::Parser;

use triangles::config::{ConfigLoader, DemoConfig, LoaderError};

#[derive(Debug, Parser)]
#[command(about = "Draws two blended triangles with OpenGL 3.3")]
pub struct Args {
    /// Path to a JSON5 config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory containing the shader files
    #[arg(long)]
    pub shader_dir: Option<PathBuf>,
    /// Window width in pixels
    #[arg(long)]
    pub width: Option<u32>,
    /// Window height in pixels
    #[arg(long)]
    pub height: Option<u32>,
    /// Multisampling level to ask the driver for
    #[arg(long)]
    pub samples: Option<u8>,
}

impl Args {
    /// Reads the config file, if any, and lets command line values override it.
    pub fn load_config(&self) -> Result<DemoConfig, LoaderError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_path(path)?,
            None => DemoConfig::default(),
        };

        if let Some(dir) = &self.shader_dir {
            config.shader_dir = dir.clone();
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(samples) = self.samples {
            config.window.samples = samples;
        }

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let args = Args::try_parse_from(["static-triangles"]).unwrap();

        assert_eq!(args.load_config().unwrap(), DemoConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../config/rotating.json5");
        let args = Args::try_parse_from([
            "rotating-triangles",
            "--config",
            config_path,
            "--width",
            "640",
            "--shader-dir",
            "elsewhere",
        ])
        .unwrap();

        let config = args.load_config().unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 512);
        assert_eq!(config.shader_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.window.title.as_deref(), Some("Two rotating triangles"));
    }

    #[test]
    fn overrides_are_validated() {
        let args = Args::try_parse_from(["static-triangles", "--height", "0"]).unwrap();

        assert!(matches!(args.load_config(), Err(LoaderError::Invalid(_))));
    }

    #[test]
    fn missing_config_file_fails() {
        let args = Args::try_parse_from(["static-triangles", "-c", "no/such/file.json5"]).unwrap();

        assert!(matches!(args.load_config(), Err(LoaderError::InputError(_))));
    }
}
