use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::Path;
use std::process;

use clap::{Arg, ArgAction, Command};
use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::DecodeReaderBytesBuilder;

use opencc_rounds::{DictionaryError, OpenCC, OpenccConfig};

const BLUE: &str = "\x1B[1;34m";
const RESET: &str = "\x1B[0m";

/// Opens a converter from a directory of text tables or a CBOR / Zstd blob.
fn load_opencc(source: &Path) -> Result<OpenCC, DictionaryError> {
    if source.is_dir() {
        return OpenCC::from_dicts_dir(source);
    }
    match source.extension().and_then(|ext| ext.to_str()) {
        Some("cbor") => OpenCC::from_cbor(source),
        _ => OpenCC::from_compressed(source),
    }
}

fn encoding_for(label: &str) -> io::Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unsupported encoding: {}", label),
        )
    })
}

/// Decodes `bytes` from `encoding`; a UTF-8 BOM is dropped either way.
fn decode(bytes: &[u8], encoding: &'static Encoding) -> io::Result<String> {
    let mut decoded = String::with_capacity(bytes.len());
    DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .bom_override(true)
        .build(bytes)
        .read_to_string(&mut decoded)?;
    Ok(decoded)
}

fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    if encoding == UTF_8 {
        return text.as_bytes().to_vec();
    }
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        eprintln!(
            "Warning: some characters are not representable in {}",
            encoding.name()
        );
    }
    bytes.into_owned()
}

fn build_cli() -> Command {
    let configs: Vec<&str> = OpenccConfig::ALL.iter().map(|c| c.as_str()).collect();

    Command::new("opencc-rs")
        .about(format!(
            "{BLUE}OpenCC Rust: Command Line Open Chinese Converter{RESET}"
        ))
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("file")
                .help("Read original text from <file> (default: stdin)."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("file")
                .help("Write converted text to <file> (default: stdout)."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("conversion")
                .required(true)
                .help(format!("Conversion configuration: [{}]", configs.join("|"))),
        )
        .arg(
            Arg::new("punct")
                .short('p')
                .long("punct")
                .action(ArgAction::SetTrue)
                .help("Also convert punctuation (quotes <-> corner brackets)."),
        )
        .arg(
            Arg::new("dicts")
                .short('d')
                .long("dicts")
                .value_name("path")
                .default_value("dicts")
                .help("Directory of *.txt tables, or a .zstd / .cbor dictionary blob."),
        )
        .arg(
            Arg::new("in_enc")
                .long("in-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for input: UTF-8|GB2312|GBK|gb18030|BIG5"),
        )
        .arg(
            Arg::new("out_enc")
                .long("out-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for output: UTF-8|GB2312|GBK|gb18030|BIG5"),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = build_cli().get_matches();
    let arg = |id: &str| matches.get_one::<String>(id).map(String::as_str);

    let config = match OpenccConfig::try_from(arg("config").unwrap_or_default()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!(
                "Valid configs: {:?}",
                OpenccConfig::ALL.map(OpenccConfig::as_str)
            );
            process::exit(1);
        }
    };
    let punctuation = matches.get_flag("punct");
    let in_enc = encoding_for(arg("in_enc").unwrap_or("UTF-8"))?;
    let out_enc = encoding_for(arg("out_enc").unwrap_or("UTF-8"))?;
    let dicts = arg("dicts").unwrap_or("dicts");
    let input_file = arg("input");
    let output_file = arg("output");

    let opencc = match load_opencc(Path::new(dicts)) {
        Ok(opencc) => opencc,
        Err(err) => {
            eprintln!("Cannot load dictionaries from '{}': {}", dicts, err);
            process::exit(1);
        }
    };

    let mut raw = Vec::new();
    match input_file {
        Some(path) => {
            File::open(path)?.read_to_end(&mut raw)?;
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("{BLUE}Input text to convert, <ctrl-z> or <ctrl-d> to submit:{RESET}");
            }
            stdin.lock().read_to_end(&mut raw)?;
        }
    }

    let text = decode(&raw, in_enc)?;
    let converted = opencc.convert_with_config(&text, config, punctuation);

    let mut writer: BufWriter<Box<dyn Write>> = BufWriter::new(match output_file {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    });
    writer.write_all(&encode(&converted, out_enc))?;
    writer.flush()?;

    eprintln!(
        "{BLUE}Conversion completed ({config}{}): {} -> {}{RESET}",
        if punctuation { ", punct" } else { "" },
        input_file.unwrap_or("<stdin>"),
        output_file.unwrap_or("stdout")
    );

    Ok(())
}
