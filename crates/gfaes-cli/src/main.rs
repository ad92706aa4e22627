//! Command-line interface for `gfaes`.

#![forbid(unsafe_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gfaes_core::{encrypt_block, expand_key, tables, Block, SubstitutionTables, BLOCK_SIZE};
use gfaes_modes::{decrypt, encrypt, CipherOptions, Envelope, Mode, Padding, Strength};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES over explicit GF(2^8) arithmetic, with CBC and CTR modes.
#[derive(Parser)]
#[command(name = "gfaes", version, author, about = "From-scratch AES with CBC/CTR modes")]
struct Cli {
    /// Print resolved options and sizes on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message and emit `IV || ciphertext`.
    Enc {
        /// Key as hex (32 characters for AES-128).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// IV as 32 hex characters; generated when omitted.
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
        /// RNG seed for a reproducible generated IV.
        #[arg(long, conflicts_with = "iv_hex")]
        seed: Option<u64>,
        #[command(flatten)]
        cipher: CipherArgs,
        #[command(flatten)]
        input: InputArgs,
        /// Message given inline as UTF-8 text.
        #[arg(long, conflicts_with_all = ["input", "input_hex"])]
        message: Option<String>,
        /// Output path; hex on stdout when omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Wrap the ciphertext in a self-describing envelope.
        #[arg(long, default_value_t = false)]
        envelope: bool,
    },
    /// Decrypt `IV || ciphertext` or an envelope.
    Dec {
        /// Key as hex (32 characters for AES-128).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        #[command(flatten)]
        cipher: CipherArgs,
        #[command(flatten)]
        input: InputArgs,
        /// Output path; stdout when omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Input is an envelope; its recorded options override the flags.
        #[arg(long, default_value_t = false)]
        envelope: bool,
        /// Print the plaintext as UTF-8 instead of hex.
        #[arg(long, default_value_t = false)]
        text: bool,
    },
    /// Run known-answer fixtures and seeded round trips.
    Check {
        /// Number of random round trips per mode.
        #[arg(long, default_value_t = 8)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the S-box as a 16x16 hex grid.
    Tables {
        /// Print the inverse S-box instead.
        #[arg(long, default_value_t = false)]
        inverse: bool,
    },
    /// Run a local demo: random key, IV and message, encrypted and decrypted back.
    Demo {
        /// Mode of operation.
        #[arg(long, value_enum, default_value_t = ModeArg::Cbc)]
        mode: ModeArg,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct CipherArgs {
    /// Mode of operation.
    #[arg(long, value_enum, default_value_t = ModeArg::Cbc)]
    mode: ModeArg,
    /// Key strength in bits.
    #[arg(long, value_enum, default_value_t = StrengthArg::Aes128)]
    strength: StrengthArg,
    /// Padding applied to CBC plaintext.
    #[arg(long, value_enum, default_value_t = PaddingArg::Pkcs5)]
    padding: PaddingArg,
}

impl CipherArgs {
    fn options(&self) -> CipherOptions {
        CipherOptions::new(self.strength.into(), self.mode.into()).with_padding(self.padding.into())
    }
}

#[derive(Args)]
struct InputArgs {
    /// Input file.
    #[arg(long, value_name = "FILE", conflicts_with = "input_hex")]
    input: Option<PathBuf>,
    /// Input given inline as hex.
    #[arg(long, value_name = "HEX")]
    input_hex: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Cbc,
    Ctr,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Cbc => Mode::Cbc,
            ModeArg::Ctr => Mode::Ctr,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrengthArg {
    #[value(name = "128")]
    Aes128,
    #[value(name = "192")]
    Aes192,
    #[value(name = "256")]
    Aes256,
}

impl From<StrengthArg> for Strength {
    fn from(value: StrengthArg) -> Self {
        match value {
            StrengthArg::Aes128 => Strength::Aes128,
            StrengthArg::Aes192 => Strength::Aes192,
            StrengthArg::Aes256 => Strength::Aes256,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PaddingArg {
    Pkcs5,
    None,
}

impl From<PaddingArg> for Padding {
    fn from(value: PaddingArg) -> Self {
        match value {
            PaddingArg::Pkcs5 => Padding::Pkcs5,
            PaddingArg::None => Padding::None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    match cli.command {
        Commands::Enc {
            key_hex,
            iv_hex,
            seed,
            cipher,
            input,
            message,
            output,
            envelope,
        } => {
            let plaintext = match message {
                Some(text) => text.into_bytes(),
                None => read_input(&input)?,
            };
            let iv = match iv_hex {
                Some(hex_str) => parse_block_hex(&hex_str).context("decode IV hex")?,
                None => random_block(&mut seeded_rng(seed)),
            };
            cmd_enc(&key_hex, &iv, &cipher.options(), &plaintext, output.as_deref(), envelope, verbose)
        }
        Commands::Dec {
            key_hex,
            cipher,
            input,
            output,
            envelope,
            text,
        } => {
            let data = read_input(&input)?;
            cmd_dec(&key_hex, &cipher.options(), &data, output.as_deref(), envelope, text, verbose)
        }
        Commands::Check { samples, seed } => cmd_check(samples, seed, verbose),
        Commands::Tables { inverse } => {
            print!("{}", render_table(tables()?, inverse)?);
            Ok(())
        }
        Commands::Demo { mode, seed } => cmd_demo(mode.into(), seed),
    }
}

fn cmd_enc(
    key_hex: &str,
    iv: &Block,
    options: &CipherOptions,
    plaintext: &[u8],
    output: Option<&Path>,
    envelope: bool,
    verbose: bool,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    if verbose {
        eprintln!(
            "{} {} padding={:?} iv={} plaintext={} bytes",
            options.strength,
            options.mode,
            options.padding,
            hex::encode(iv),
            plaintext.len()
        );
    }
    let bytes = if envelope {
        Envelope::seal(plaintext, &key, iv, *options)
            .context("encrypt")?
            .to_bytes()
            .context("serialize envelope")?
    } else {
        encrypt(plaintext, &key, iv, options).context("encrypt")?
    };
    match output {
        Some(path) => fs::write(path, &bytes).with_context(|| format!("write {}", path.display())),
        None => {
            println!("{}", hex::encode(&bytes));
            Ok(())
        }
    }
}

fn cmd_dec(
    key_hex: &str,
    options: &CipherOptions,
    data: &[u8],
    output: Option<&Path>,
    envelope: bool,
    text: bool,
    verbose: bool,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let plaintext = if envelope {
        let envelope = Envelope::from_bytes(data).context("deserialize envelope")?;
        if verbose {
            eprintln!(
                "envelope v{}: {} {} padding={:?}, payload={} bytes",
                envelope.version,
                envelope.options.strength,
                envelope.options.mode,
                envelope.options.padding,
                envelope.payload.len()
            );
        }
        envelope.open(&key).context("decrypt")?
    } else {
        if verbose {
            eprintln!(
                "{} {} padding={:?}, input={} bytes",
                options.strength,
                options.mode,
                options.padding,
                data.len()
            );
        }
        decrypt(data, &key, options).context("decrypt")?
    };

    match output {
        Some(path) => {
            fs::write(path, &plaintext).with_context(|| format!("write {}", path.display()))
        }
        None if text => {
            let text = String::from_utf8(plaintext).context("plaintext is not valid UTF-8")?;
            println!("{text}");
            Ok(())
        }
        None => {
            println!("{}", hex::encode(&plaintext));
            Ok(())
        }
    }
}

/// Known `IV || ciphertext` fixtures with the plaintext each decrypts to.
const FIXTURES: [(Mode, &str, &str, &str); 4] = [
    (
        Mode::Cbc,
        "140b41b22a29beb4061bda66b6747e14",
        "4ca00ff4c898d61e1edbf1800618fb2828a226d160dad07883d04e008a7897ee\
         2e4b7465d5290d0c0e6c6822236e1daafb94ffe0c5da05d9476be028ad7c1d81",
        "Basic CBC mode encryption needs padding.",
    ),
    (
        Mode::Cbc,
        "140b41b22a29beb4061bda66b6747e14",
        "5b68629feb8606f9a6667670b75b38a5b4832d0f26e1ab7da33249de7d4afc48\
         e713ac646ace36e872ad5fb8a512428a6e21364b0c374df45503473c5242a253",
        "Our implementation uses rand. IV",
    ),
    (
        Mode::Ctr,
        "36f18357be4dbd77f050515c73fcf9f2",
        "69dda8455c7dd4254bf353b773304eec0ec7702330098ce7f7520d1cbbb20fc3\
         88d1b0adb5054dbd7370849dbf0b88d393f252e764f1f5f7ad97ef79d59ce29f\
         5f51eeca32eabedd9afa9329",
        "CTR mode lets you build a stream cipher from a block cipher.",
    ),
    (
        Mode::Ctr,
        "36f18357be4dbd77f050515c73fcf9f2",
        "770b80259ec33beb2561358a9f2dc617e46218c0a53cbeca695ae45faa8952aa\
         0e311bde9d4e01726d3184c34451",
        "Always avoid the two time pad!",
    ),
];

fn cmd_check(samples: usize, seed: Option<u64>, verbose: bool) -> Result<()> {
    // FIPS-197 appendix C.1
    let key = parse_key_hex("000102030405060708090a0b0c0d0e0f")?;
    let block = parse_block_hex("00112233445566778899aabbccddeeff")?;
    let round_keys = expand_key(&key, Strength::Aes128.iterations())?;
    let actual = encrypt_block(&block, &round_keys)?;
    if hex::encode(actual) != "69c4e0d86a7b0430d8cdb78070b4c55a" {
        bail!("block cipher known answer mismatch: {}", hex::encode(actual));
    }
    println!("ok  block known answer");

    for (index, (mode, key_hex, fixture, expected)) in FIXTURES.iter().enumerate() {
        let key = parse_key_hex(key_hex)?;
        let data = hex::decode(fixture).context("decode fixture hex")?;
        let options = CipherOptions::new(Strength::Aes128, *mode);
        let plaintext = decrypt(&data, &key, &options)
            .with_context(|| format!("decrypt fixture {index}"))?;
        if plaintext != expected.as_bytes() {
            bail!("{mode} fixture {index} decrypted to {}", hex::encode(&plaintext));
        }
        let iv = parse_block_hex(&fixture[..2 * BLOCK_SIZE])?;
        if encrypt(&plaintext, &key, &iv, &options)? != data {
            bail!("{mode} fixture {index} did not re-encrypt to the same bytes");
        }
        if verbose {
            eprintln!("{mode} fixture {index}: {expected:?}");
        }
        println!("ok  {mode} fixture {index}");
    }

    let mut rng = seeded_rng(seed);
    for mode in [Mode::Cbc, Mode::Ctr] {
        let options = CipherOptions::new(Strength::Aes128, mode);
        for _ in 0..samples {
            let key = random_block(&mut rng);
            let iv = random_block(&mut rng);
            let mut message = vec![0u8; rng.gen_range(0..96)];
            rng.fill_bytes(&mut message);
            let sealed = encrypt(&message, &key, &iv, &options)?;
            if decrypt(&sealed, &key, &options)? != message {
                bail!("{mode} round trip failed for a {}-byte message", message.len());
            }
        }
        println!("ok  {mode} round trips ({samples})");
    }
    Ok(())
}

fn cmd_demo(mode: Mode, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = random_block(&mut rng);
    let iv = random_block(&mut rng);
    let mut message = vec![0u8; 40];
    rng.fill_bytes(&mut message);

    let options = CipherOptions::new(Strength::Aes128, mode);
    let ciphertext = encrypt(&message, &key, &iv, &options)?;
    let decrypted = decrypt(&ciphertext, &key, &options)?;

    println!("demo key: {}", hex::encode(key));
    println!("mode: {mode}");
    println!("plaintext: {}", hex::encode(&message));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn render_table(tables: &SubstitutionTables, inverse: bool) -> Result<String> {
    let dimens = gfaes_core::sbox::TABLE_DIMENS;
    let mut out = String::from("   ");
    for col in 0..dimens {
        write!(out, " {col:x} ")?;
    }
    out.push('\n');
    for row in 0..dimens {
        write!(out, "{row:x} |")?;
        for col in 0..dimens {
            write!(out, " {:02x}", tables.lookup(row, col, inverse)?)?;
        }
        out.push('\n');
    }
    Ok(out)
}

fn read_input(args: &InputArgs) -> Result<Vec<u8>> {
    match (&args.input, &args.input_hex) {
        (Some(path), _) => fs::read(path).with_context(|| format!("read {}", path.display())),
        (None, Some(hex_str)) => hex::decode(hex_str.trim()).context("decode input hex"),
        (None, None) => bail!("one of --input or --input-hex is required"),
    }
}

fn parse_key_hex(hex_str: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if bytes.is_empty() {
        bail!("key must not be empty");
    }
    Ok(bytes)
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    if bytes.len() != BLOCK_SIZE {
        bail!("block must be {BLOCK_SIZE} bytes ({} hex characters)", 2 * BLOCK_SIZE);
    }
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn random_block(rng: &mut impl RngCore) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut block);
    block
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
