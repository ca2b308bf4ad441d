//! Subcommand handlers.

use std::path::{Path, PathBuf};

use super::args::{Args, Command, ConfigAction, RenderArgs};
use crate::ascii::{map_image, CharSet, GlyphGrid, MapperConfig, TextFormat};
use crate::config::{self, default_path as get_config_path, Config, ConfigError};
use crate::decode::open_image;
use crate::error::GlyphError;
use crate::export;
use crate::generator;
use crate::provider::{OpenAiImageClient, ProviderError, OPENAI_API_BASE_URL, OPENAI_API_KEY_ENV};
use crate::reveal::{RevealScheduler, RevealText, TerminalObserver};

/// Errors surfaced to the user by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Glyph(#[from] GlyphError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to write '{}': {source}", path.display())]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Dispatch a parsed command line.
pub async fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Config { action } => handle_config_action(action, args.config.as_deref()),
        Command::Charsets => {
            list_charsets();
            Ok(())
        }
        Command::Render { image, render } => {
            let config = Config::load(args.config.as_deref())?;
            render_file(&image, &render, &config).await
        }
        Command::Generate {
            prompt,
            render,
            save_image,
        } => {
            let config = Config::load(args.config.as_deref())?;
            generate(&prompt, &render, save_image.as_deref(), &config).await
        }
    }
}

/// Convert an image file and show it.
pub async fn render_file(image: &Path, render: &RenderArgs, config: &Config) -> Result<(), CliError> {
    let mapper = render.mapper_config(config);
    mapper.validate()?;
    let (_, pixels) = open_image(image)?;
    let grid = map_image(&pixels, &mapper)?;
    present(&grid, &mapper, render, config).await
}

/// Generate an image from `prompt`, convert it and show it.
pub async fn generate(
    prompt: &str,
    render: &RenderArgs,
    save_image: Option<&Path>,
    config: &Config,
) -> Result<(), CliError> {
    let mapper = render.mapper_config(config);
    let client = provider_client(config)?;

    eprintln!("Generating image...");
    let rendered = generator::generate(&client, prompt, &mapper).await?;

    if let Some(dest) = save_image {
        export::write_image(dest, &rendered.image_bytes).map_err(|source| CliError::Export {
            path: dest.to_path_buf(),
            source,
        })?;
        eprintln!("Saved image to {}", dest.display());
    }

    present(&rendered.grid, &mapper, render, config).await
}

fn provider_client(config: &Config) -> Result<OpenAiImageClient, ProviderError> {
    let api_key = std::env::var(OPENAI_API_KEY_ENV).map_err(|_| ProviderError::MissingApiKey)?;
    let base_url = config
        .provider
        .base_url
        .clone()
        .unwrap_or_else(|| OPENAI_API_BASE_URL.to_string());
    let client = OpenAiImageClient::with_base_url(api_key, base_url)?;
    Ok(match &config.provider.size {
        Some(size) => client.size(size.clone()),
        None => client,
    })
}

/// Save the text if requested, then reveal it on stdout.
async fn present(
    grid: &GlyphGrid,
    mapper: &MapperConfig,
    render: &RenderArgs,
    config: &Config,
) -> Result<(), CliError> {
    if let Some(dest) = &render.save_text {
        let text = grid.render_as(TextFormat::for_export(mapper.color_mode));
        export::write_text(dest, &text).map_err(|source| CliError::Export {
            path: dest.clone(),
            source,
        })?;
    }

    let text = RevealText::from_grid(grid, TextFormat::for_terminal(mapper.color_mode));
    let mut scheduler = RevealScheduler::new(TerminalObserver::stdout());
    scheduler.reveal(text, render.animate(config));

    let interrupted = tokio::select! {
        _ = scheduler.wait() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        log::debug!("Reveal interrupted");
        scheduler.clear();
    }
    println!();

    if let Some(dest) = &render.save_text {
        eprintln!("Saved text to {}", dest.display());
    }
    Ok(())
}

/// Print every built-in character set.
pub fn list_charsets() {
    println!("Available character sets:");
    for charset in CharSet::ALL {
        let default = if charset == CharSet::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {:<10} \"{}\"{}", charset.name(), charset.glyphs(), default);
    }
    println!();
    println!("Use --charset <name>, or --chars \"...\" for a custom set (darkest first).");
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), CliError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);
    match action {
        ConfigAction::Show => {
            let cfg = Config::load(path)?;
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found)", config_path.display());
            }
            println!("{}", cfg.to_toml()?);
        }
        ConfigAction::Init => {
            let created = config::init(&config_path)?;
            println!("Created config file: {}", created.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path) {
        let img = image::RgbaImage::from_raw(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        img.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_render_file_saves_text() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("in.png");
        let out = dir.path().join("out").join("art.txt");
        write_png(&image);

        let render = RenderArgs {
            width: Some(2),
            chars: Some(" #".to_string()),
            save_text: Some(out.clone()),
            ..Default::default()
        };
        render_file(&image, &render, &Config::default()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), " #");
    }

    #[tokio::test]
    async fn test_render_file_colored_export_is_markup() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("in.png");
        let out = dir.path().join("art.html");
        write_png(&image);

        let render = RenderArgs {
            width: Some(2),
            chars: Some(" #".to_string()),
            color: Some(crate::cli::Color::Truecolor),
            save_text: Some(out.clone()),
            ..Default::default()
        };
        render_file(&image, &render, &Config::default()).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "<span style=\"color: rgb(0,0,0)\"> </span><span style=\"color: rgb(255,255,255)\">#</span>"
        );
    }

    #[tokio::test]
    async fn test_render_file_zero_width_is_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("in.png");
        write_png(&image);

        let render = RenderArgs {
            width: Some(0),
            ..Default::default()
        };
        let result = render_file(&image, &render, &Config::default()).await;
        assert!(matches!(
            result,
            Err(CliError::Glyph(GlyphError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_config_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        handle_config_action(ConfigAction::Init, Some(&path)).unwrap();
        assert!(path.exists());
        handle_config_action(ConfigAction::Show, Some(&path)).unwrap();
        assert!(matches!(
            handle_config_action(ConfigAction::Init, Some(&path)),
            Err(CliError::Config(ConfigError::AlreadyExists(_)))
        ));
    }
}
