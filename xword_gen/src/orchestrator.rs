use std::{
  cmp::Reverse,
  ops::ControlFlow,
  sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
  },
};

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
  attempt::{Attempt, AttemptResult, AttemptSpec},
  config::GeneratorConfig,
  error::GenerateError,
  executor::{select_executor, AttemptExecutor, AttemptJob},
  finalize::{finalize, Crossword},
  word_pool::WordPool,
};

/// Derives the generator seed of one attempt from the master seed.
fn attempt_seed(master_seed: u64, index: usize) -> u64 {
  master_seed ^ (index as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

pub fn is_acceptable(result: &AttemptResult, config: &GeneratorConfig) -> bool {
  result.placed_count() >= config.min_placed_words
    && config
      .min_themed_ratio
      .is_none_or(|ratio| result.themed_ratio() >= ratio)
}

/// The acceptable attempt with the most placed words. Ties go to the attempt
/// with more themed words, then to the lower attempt index, so the choice
/// never depends on completion order.
pub fn select_best(
  results: impl IntoIterator<Item = AttemptResult>,
  config: &GeneratorConfig,
) -> Option<AttemptResult> {
  results
    .into_iter()
    .filter(|result| is_acceptable(result, config))
    .max_by_key(|result| (result.placed_count(), result.themed_count(), Reverse(result.index)))
}

/// Prepared pools and configuration, shared read-only by every attempt.
pub struct Generator {
  pool: Arc<WordPool>,
  config: Arc<GeneratorConfig>,
  master_seed: u64,
}

impl Generator {
  pub fn new<S, T>(
    themed: impl IntoIterator<Item = S>,
    common: impl IntoIterator<Item = T>,
    config: GeneratorConfig,
  ) -> Result<Self, GenerateError>
  where
    S: AsRef<str>,
    T: AsRef<str>,
  {
    config.validate()?;
    let master_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(master_seed);
    let pool = WordPool::prepare(themed, common, config.max_size, &mut rng)?;
    info!(
      "Prepared {} themed and {} common words (seed {master_seed})",
      pool.themed().len(),
      pool.common().len()
    );

    Ok(Self {
      pool: Arc::new(pool),
      config: Arc::new(config),
      master_seed,
    })
  }

  pub fn pool(&self) -> &WordPool {
    &self.pool
  }

  pub fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  pub fn master_seed(&self) -> u64 {
    self.master_seed
  }

  pub fn attempt_specs(&self) -> Vec<AttemptSpec> {
    self
      .pool
      .seeds(self.config.num_attempts)
      .enumerate()
      .map(|(index, seed_word)| AttemptSpec {
        index,
        seed_word: seed_word.to_owned(),
        rng_seed: attempt_seed(self.master_seed, index),
      })
      .collect()
  }

  fn jobs(&self, stop: &Arc<AtomicBool>, progress: &Arc<AtomicUsize>) -> Vec<AttemptJob> {
    self
      .attempt_specs()
      .into_iter()
      .map(|spec| -> AttemptJob {
        let pool = self.pool.clone();
        let config = self.config.clone();
        let stop = stop.clone();
        let progress = progress.clone();
        Box::new(move || {
          let result = Attempt::new(&pool, &config, &spec)
            .with_stop_flag(&stop)
            .run();
          progress.fetch_add(1, Ordering::Relaxed);
          result
        })
      })
      .collect()
  }

  pub fn generate(&self) -> Result<Crossword, GenerateError> {
    let executor = select_executor(self.config.parallel);
    self.generate_with(executor.as_ref())
  }

  pub fn generate_with(&self, executor: &dyn AttemptExecutor) -> Result<Crossword, GenerateError> {
    let stop = Arc::new(AtomicBool::new(false));
    let progress = Arc::new(AtomicUsize::new(0));
    let jobs = self.jobs(&stop, &progress);
    let total = jobs.len();
    debug!("Running {total} attempts on the {} executor", executor.name());

    let mut results = Vec::with_capacity(total);
    executor
      .execute(jobs, &mut |result: AttemptResult| {
        debug!(
          "{}/{total} attempts finished, attempt {} placed {} words",
          progress.load(Ordering::Relaxed),
          result.index,
          result.placed_count()
        );
        let good_enough = is_acceptable(&result, &self.config)
          && self
            .config
            .stop_at_words
            .is_some_and(|words| result.placed_count() >= words);
        results.push(result);

        if good_enough {
          stop.store(true, Ordering::Relaxed);
          ControlFlow::Break(())
        } else {
          ControlFlow::Continue(())
        }
      })
      .map_err(|err| GenerateError::Internal(err.to_string()))?;

    let attempts = results.len();
    let best_placed = results.iter().map(AttemptResult::placed_count).max().unwrap_or(0);
    let best = select_best(results, &self.config)
      .ok_or(GenerateError::SearchExhausted { attempts, best_placed })?;
    info!(
      "Selected attempt {} seeded with {}: {} words, {} themed",
      best.index,
      best.seed_word,
      best.placed_count(),
      best.themed_count()
    );

    finalize(&best.placed, self.config.max_size)
  }
}

/// Prepares the pools and runs every attempt, returning the best grid.
pub fn generate<S, T>(
  themed: impl IntoIterator<Item = S>,
  common: impl IntoIterator<Item = T>,
  config: GeneratorConfig,
) -> Result<Crossword, GenerateError>
where
  S: AsRef<str>,
  T: AsRef<str>,
{
  Generator::new(themed, common, config)?.generate()
}
