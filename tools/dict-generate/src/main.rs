use clap::{Arg, Command};
use opencc_rounds::dictionary_lib::{DictSlot, DictionaryMaxlength};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const BLUE: &str = "\x1B[1;34m"; // Bold Blue
    const RESET: &str = "\x1B[0m"; // Reset color

    let matches = Command::new("Dictionary Generator")
        .about(format!(
            "{BLUE}Dict Generator: build dictionary blobs from OpenCC text tables{RESET}"
        ))
        .after_help(
            "Examples:\n\
         \n\
         dict-generate --dicts dicts --format zstd --output dictionary_maxlength.zstd\n\
         dict-generate --format cbor --output dictionary_maxlength.cbor\n\
         dict-generate --format txt --output normalized_dicts\n\
         \n\
         Blobs load with DictionaryMaxlength::load_compressed() / deserialize_from_cbor().\n",
        )
        .arg(
            Arg::new("dicts")
                .short('d')
                .long("dicts")
                .value_name("dir")
                .default_value("dicts")
                .help("Directory holding the 18 OpenCC *.txt tables"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("format")
                .default_value("zstd")
                .value_parser(["zstd", "cbor", "txt"])
                .help("Output format: [zstd|cbor|txt]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("path")
                .help("Write the result to <path>. If not specified, a default name is used."),
        )
        .get_matches();

    let dict_dir = matches
        .get_one::<String>("dicts")
        .map(String::as_str)
        .unwrap_or("dicts");
    if !Path::new(dict_dir).is_dir() {
        eprintln!(
            "{BLUE}Dictionary directory '{dict_dir}' not found.{RESET}\n\
         Expected files: {}",
            DictSlot::ALL.map(DictSlot::file_name).join(", ")
        );
        std::process::exit(1);
    }

    let dict_format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("zstd");

    let default_output = match dict_format {
        "cbor" => "dictionary_maxlength.cbor",
        "txt" => "dicts_normalized",
        _ => "dictionary_maxlength.zstd",
    };
    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or(default_output);

    let dictionary = DictionaryMaxlength::from_dicts(dict_dir)?;
    eprintln!(
        "{BLUE}Loaded {} entries from {dict_dir}{RESET}",
        dictionary.total_entries()
    );

    match dict_format {
        "cbor" => {
            dictionary.serialize_to_cbor(output)?;
            eprintln!("{BLUE}Dictionary saved in CBOR format at: {output}{RESET}");
        }
        "txt" => {
            dictionary.to_dicts(output)?;
            eprintln!("{BLUE}Dictionary tables written to: {output}{RESET}");
        }
        _ => {
            dictionary.save_compressed(output)?;
            eprintln!("{BLUE}Dictionary saved in ZSTD format at: {output}{RESET}");
        }
    }

    Ok(())
}
