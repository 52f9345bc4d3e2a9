use clap::{Parser, Subcommand};
use rust_qr_codec::codec::mask::{apply_mask, apply_with_format, penalty_breakdown};
use rust_qr_codec::config::parse_mode;
use rust_qr_codec::tools::{decode_file, render, save_png};
use rust_qr_codec::{Codec, EncodeOptions, MaskPattern, QRCode, QrResult, RenderOptions, Version};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code encoder/decoder (versions 1-3, level M)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a PNG and/or print it to the terminal
    Encode {
        text: String,
        /// Output PNG path
        #[arg(long)]
        out: Option<PathBuf>,
        /// Force version 1-3
        #[arg(long)]
        version: Option<u8>,
        /// Force mask 0-7
        #[arg(long)]
        mask: Option<u8>,
        /// Force mode: numeric, alphanumeric or byte
        #[arg(long)]
        mode: Option<String>,
        /// Print the symbol with block characters
        #[arg(long)]
        terminal: bool,
        #[arg(long)]
        module_px: Option<u32>,
        #[arg(long)]
        quiet_zone: Option<u32>,
    },
    /// Decode a rendered, axis-aligned symbol image
    Decode { image: PathBuf },
    /// Show the penalty of every mask for a message
    Inspect { text: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode {
            text,
            out,
            version,
            mask,
            mode,
            terminal,
            module_px,
            quiet_zone,
        } => encode_options(version, mask, mode.as_deref()).and_then(|options| {
            let mut render_options = RenderOptions::from_env();
            if let Some(px) = module_px {
                render_options = render_options.with_module_px(px);
            }
            if let Some(zone) = quiet_zone {
                render_options = render_options.with_quiet_zone(zone);
            }
            encode_cmd(&text, options, render_options, out.as_deref(), terminal)
        }),
        Command::Decode { image } => decode_cmd(&image),
        Command::Inspect { text } => inspect_cmd(&text),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Environment defaults with command-line flags on top
fn encode_options(
    version: Option<u8>,
    mask: Option<u8>,
    mode: Option<&str>,
) -> QrResult<EncodeOptions> {
    let mut options = EncodeOptions::from_env();
    if let Some(number) = version {
        options = options.with_version(Version::from_number(number)?);
    }
    if let Some(id) = mask {
        options = options.with_mask(MaskPattern::from_id(id)?);
    }
    if let Some(name) = mode {
        match parse_mode(name) {
            Some(mode) => options = options.with_mode(mode),
            None => eprintln!("Unknown mode {name:?}, choosing automatically"),
        }
    }
    Ok(options)
}

fn print_summary(code: &QRCode) {
    println!(
        "version={} size={} error_correction={:?} mask={} mode={}",
        code.version,
        code.modules.size(),
        code.error_correction,
        code.mask_pattern.id(),
        code.mode.name()
    );
}

fn encode_cmd(
    text: &str,
    options: EncodeOptions,
    render_options: RenderOptions,
    out: Option<&Path>,
    terminal: bool,
) -> QrResult<()> {
    let code = Codec::shared().encoder_with(options).encode(text)?;
    print_summary(&code);
    if let Some(penalty) = code.penalty {
        println!("penalty={penalty}");
    }

    if let Some(path) = out {
        let image = render(&code.modules, &render_options)?;
        save_png(&image, path)?;
        println!("Wrote {} ({}x{})", path.display(), image.width(), image.height());
    }
    if terminal || out.is_none() {
        println!("{}", code.modules.to_terminal(render_options.quiet_zone as usize));
    }
    Ok(())
}

fn decode_cmd(image: &Path) -> QrResult<()> {
    let code = decode_file(image)?;
    print_summary(&code);
    println!("{}", code.content);
    Ok(())
}

fn inspect_cmd(text: &str) -> QrResult<()> {
    let codec = Codec::shared();
    let code = codec.encoder().encode(text)?;
    print_summary(&code);

    let reserved = codec.reserved(code.version);
    let mut unmasked = code.modules.clone();
    apply_mask(&mut unmasked, reserved, code.mask_pattern)?;

    println!("mask  runs  blocks  finder  balance  total");
    for mask in MaskPattern::ALL {
        let mut trial = unmasked.clone();
        apply_with_format(&mut trial, reserved, mask)?;
        let score = penalty_breakdown(&trial);
        let marker = if mask == code.mask_pattern { " *" } else { "" };
        println!(
            "{:>4}  {:>4}  {:>6}  {:>6}  {:>7}  {:>5}{}",
            mask.id(),
            score.runs,
            score.blocks,
            score.finder_like,
            score.balance,
            score.total(),
            marker
        );
    }
    Ok(())
}
