// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ednrw::read::Reader;
use ednrw::settings::{ContainerStrategy, DecodeSettings, EncodeSettings,
                      ENCODE_SETTINGS, HASH_SETTINGS};
use ednrw::encode_with;
use clap::Parser as ClapParser;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};


#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Container {
    Hash,
    Alist,
    Flat,
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// How maps are represented after reading
    #[clap(long, value_enum, default_value = "hash")]
    container: Container,
    /// Write lists of two integers as #inst timestamps
    #[clap(short, long, value_parser)]
    timestamps: bool,
    /// Only count the top-level values, don't print them
    #[clap(short, long, value_parser)]
    count: bool,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let decode_settings = DecodeSettings {
        container: match args.container {
            Container::Hash => ContainerStrategy::Hash,
            Container::Alist => ContainerStrategy::AssociationList,
            Container::Flat => ContainerStrategy::FlatSequence,
        },
        ..HASH_SETTINGS
    };
    let encode_settings = EncodeSettings {
        emit_timestamps: args.timestamps,
        ..ENCODE_SETTINGS
    };

    // The whole file has to be in memory before reading.
    let input = std::fs::read_to_string(&args.input_path)
        .with_context(|| format!("reading {:?}", args.input_path))?;

    let mut reader = Reader::new(&input, &decode_settings);
    let mut out = BufWriter::new(stdout());
    let mut count_toplevel = 0;
    while !reader.at_end() {
        let v = reader.read()
            .with_context(|| format!("in {:?}", args.input_path))?;
        count_toplevel += 1;
        if !args.count {
            writeln!(out, "{}", encode_with(&v, &encode_settings)?)?;
        }
    }
    writeln!(out, ";; count_toplevel = {count_toplevel}")?;
    Ok(())
}
