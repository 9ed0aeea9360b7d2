#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;
mod clues;
mod history;
mod logging;
mod render;
mod word_bank;

use std::{
  fs,
  path::{Path, PathBuf},
  process::ExitCode,
};

use args::Args;
use clap::Parser;
use clues::{clue_list, number_clues};
use history::UsedWords;
use log::{error, info, warn};
use util::{bitcode, error::XWordResult, time::time_fn};
use word_bank::WordBank;
use xword_gen::{Crossword, GenerateError, Generator};

fn load_history(path: Option<&Path>) -> XWordResult<UsedWords> {
  path.map_or_else(|| Ok(UsedWords::default()), UsedWords::load)
}

fn record_history<'a>(
  path: Option<&Path>,
  mut used: UsedWords,
  words: impl IntoIterator<Item = &'a str>,
  pool: &str,
) -> XWordResult {
  let Some(path) = path else {
    warn!("No used-word file given for {pool} words, nothing recorded");
    return Ok(());
  };
  let added = used.record(words);
  used.save(path)?;
  info!("Recorded {added} new {pool} words in {}", path.display());
  Ok(())
}

fn save_puzzle(args: &Args, crossword: &Crossword, bank: &WordBank) -> XWordResult {
  fs::create_dir_all(&args.out_dir)?;
  let out_path = |suffix: &str| -> PathBuf { args.out_dir.join(format!("{}{suffix}", args.basename)) };

  let files = [
    ("_answers.txt", render::answer_grid(crossword).into_bytes()),
    ("_exercise.txt", render::exercise_grid(crossword).into_bytes()),
    ("_clues.txt", clue_list(&number_clues(crossword, bank)).into_bytes()),
    (".bin", bitcode::encode(crossword)),
  ];
  for (suffix, contents) in files {
    let path = out_path(suffix);
    fs::write(&path, contents)?;
    info!("Wrote {}", path.display());
  }
  Ok(())
}

fn run(args: &Args) -> XWordResult {
  let mut bank = WordBank::load_all(&args.themed)?;
  let common_bank = args
    .common
    .as_deref()
    .map(WordBank::load)
    .transpose()?
    .unwrap_or_default();
  let used_themed = load_history(args.used_themed.as_deref())?;
  let used_common = load_history(args.used_common.as_deref())?;

  let themed = used_themed.unused(bank.words());
  let common = used_common.unused(common_bank.words());
  info!(
    "{} of {} themed and {} of {} common words are unused",
    themed.len(),
    bank.len(),
    common.len(),
    common_bank.len()
  );

  let generator = Generator::new(themed, common, args.generator_config())?;
  let (elapsed, crossword) = time_fn(|| generator.generate());
  let crossword = crossword?;
  info!("Generated in {elapsed:.2?}");

  println!("{}", render::answer_grid(&crossword));
  println!("{}", render::stats(&crossword));

  bank.merge(common_bank);
  save_puzzle(args, &crossword, &bank)?;

  if args.record_used {
    let (themed, common): (Vec<_>, Vec<_>) = crossword
      .placements()
      .iter()
      .partition(|placed| placed.themed);
    record_history(
      args.used_themed.as_deref(),
      used_themed,
      themed.iter().map(|placed| placed.word.as_str()),
      "themed",
    )?;
    record_history(
      args.used_common.as_deref(),
      used_common,
      common.iter().map(|placed| placed.word.as_str()),
      "common",
    )?;
  }

  Ok(())
}

fn main() -> ExitCode {
  let args = Args::parse();
  logging::init_logger(args.verbose);

  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{err}");
      match err.downcast_ref::<GenerateError>() {
        Some(err) if err.is_configuration_error() => ExitCode::from(2),
        _ => ExitCode::FAILURE,
      }
    }
  }
}
