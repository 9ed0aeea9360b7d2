//! Runs independent attempts and hands their results back as they complete.

use std::{num::NonZeroUsize, ops::ControlFlow, thread};

use log::warn;
use tokio::{runtime::Runtime, task::JoinSet};
use util::error::XWordResult;

use crate::attempt::AttemptResult;

/// One unit of work. Jobs own everything they touch except read-only shared
/// data, so they can run in any order or in parallel.
pub type AttemptJob = Box<dyn FnOnce() -> AttemptResult + Send + 'static>;

pub trait AttemptExecutor {
  fn name(&self) -> &'static str;

  /// Runs `jobs`, passing each result to `consume` in completion order. When
  /// `consume` breaks, jobs that have not finished are abandoned.
  fn execute(
    &self,
    jobs: Vec<AttemptJob>,
    consume: &mut dyn FnMut(AttemptResult) -> ControlFlow<()>,
  ) -> XWordResult;
}

/// Runs jobs one after another on the calling thread.
#[derive(Default)]
pub struct SequentialExecutor;

impl AttemptExecutor for SequentialExecutor {
  fn name(&self) -> &'static str {
    "sequential"
  }

  fn execute(
    &self,
    jobs: Vec<AttemptJob>,
    consume: &mut dyn FnMut(AttemptResult) -> ControlFlow<()>,
  ) -> XWordResult {
    for job in jobs {
      if consume(job()).is_break() {
        break;
      }
    }
    Ok(())
  }
}

/// Runs each job as a blocking task on a private tokio runtime.
pub struct ParallelExecutor {
  runtime: Runtime,
}

impl ParallelExecutor {
  pub fn new(workers: NonZeroUsize) -> XWordResult<Self> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
      .worker_threads(1)
      .max_blocking_threads(workers.get())
      .thread_name("xword-attempt")
      .build()?;
    Ok(Self { runtime })
  }
}

impl AttemptExecutor for ParallelExecutor {
  fn name(&self) -> &'static str {
    "parallel"
  }

  fn execute(
    &self,
    jobs: Vec<AttemptJob>,
    consume: &mut dyn FnMut(AttemptResult) -> ControlFlow<()>,
  ) -> XWordResult {
    self.runtime.block_on(async {
      let mut tasks = JoinSet::new();
      for job in jobs {
        tasks.spawn_blocking(job);
      }

      while let Some(result) = tasks.join_next().await {
        if consume(result?).is_break() {
          tasks.abort_all();
          break;
        }
      }
      XWordResult::<()>::Ok(())
    })
  }
}

/// Picks the parallel executor when the machine has more than one core and a
/// runtime can be built, and the sequential one otherwise.
pub fn select_executor(parallel: bool) -> Box<dyn AttemptExecutor> {
  if !parallel {
    return Box::new(SequentialExecutor);
  }

  let workers = match thread::available_parallelism() {
    Ok(workers) if workers.get() > 1 => workers,
    Ok(_) => return Box::new(SequentialExecutor),
    Err(err) => {
      warn!("Can't determine available parallelism ({err}), running attempts sequentially");
      return Box::new(SequentialExecutor);
    }
  };

  match ParallelExecutor::new(workers) {
    Ok(executor) => Box::new(executor),
    Err(err) => {
      warn!("Failed to start worker runtime ({err}), running attempts sequentially");
      Box::new(SequentialExecutor)
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::{num::NonZeroUsize, ops::ControlFlow};

  use googletest::prelude::*;

  use crate::attempt::AttemptResult;

  use super::{AttemptExecutor, AttemptJob, ParallelExecutor, SequentialExecutor};

  fn jobs(count: usize) -> Vec<AttemptJob> {
    (0..count)
      .map(|index| -> AttemptJob {
        Box::new(move || AttemptResult {
          index,
          seed_word: format!("SEED{index}"),
          placed: Vec::new(),
        })
      })
      .collect()
  }

  fn collect_indices(executor: &dyn AttemptExecutor, count: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    executor
      .execute(jobs(count), &mut |result| {
        indices.push(result.index);
        ControlFlow::Continue(())
      })
      .unwrap();
    indices
  }

  #[gtest]
  fn test_sequential_runs_in_order() {
    expect_that!(collect_indices(&SequentialExecutor, 4), container_eq([0, 1, 2, 3]));
  }

  #[gtest]
  fn test_sequential_stops_on_break() {
    let mut seen = 0;
    SequentialExecutor
      .execute(jobs(5), &mut |_| {
        seen += 1;
        if seen == 2 {
          ControlFlow::Break(())
        } else {
          ControlFlow::Continue(())
        }
      })
      .unwrap();
    expect_that!(seen, eq(2));
  }

  #[gtest]
  fn test_parallel_runs_everything() {
    let executor = ParallelExecutor::new(NonZeroUsize::new(4).unwrap()).unwrap();
    let mut indices = collect_indices(&executor, 6);
    indices.sort();
    expect_that!(indices, container_eq([0, 1, 2, 3, 4, 5]));
  }

  #[gtest]
  fn test_parallel_stops_on_break() {
    let executor = ParallelExecutor::new(NonZeroUsize::new(2).unwrap()).unwrap();
    let mut seen = 0;
    executor
      .execute(jobs(8), &mut |_| {
        seen += 1;
        ControlFlow::Break(())
      })
      .unwrap();
    expect_that!(seen, eq(1));
  }
}
