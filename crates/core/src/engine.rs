//! ParodyEngine (spec ch. 4.5): the orchestrator tying together syllable
//! analysis, rhyme analysis, prompt construction, the completer, and
//! style transfer into a single per-line generation loop.

use crate::completer::TextCompleter;
use crate::error::ParodyError;
use crate::prompt::{self, RhymeConstraint};
use crate::rhyme;
use crate::style;
use crate::syllable::{self, WordSyllables};
use crate::token::is_blank;
use crate::types::{KeywordMap, ParodyContext};

/// Tunable knobs for a single engine run.
#[derive(Debug, Clone)]
pub struct ParodyConfig {
    /// Number of punctuation/capitalization refinement passes beyond the
    /// mandatory word-syllable pass; default 2 (spec ch. 4.5).
    pub refinement_passes: usize,
}

impl Default for ParodyConfig {
    fn default() -> Self {
        Self { refinement_passes: 2 }
    }
}

/// Caller hooks for progress reporting and cooperative cancellation.
/// Both are optional; `progress` is called once per completed line with
/// `(lines_done, total_non_blank_lines)`, `cancelled` is polled at line
/// boundaries and before each completer call.
#[derive(Default)]
pub struct RunHooks<'a> {
    pub progress: Option<&'a mut dyn FnMut(usize, usize)>,
    pub cancelled: Option<&'a dyn Fn() -> bool>,
}

impl<'a> RunHooks<'a> {
    fn report(&mut self, done: usize, total: usize) {
        if let Some(cb) = self.progress.as_mut() {
            cb(done, total);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.map(|c| c()).unwrap_or(false)
    }
}

/// Trim whitespace, then strip a surrounding `"` pair, then strip a
/// surrounding `'` pair only if no other `'` remains inside (so
/// contractions like `don't` survive).
fn sanitize(raw: &str) -> String {
    let mut s = raw.trim();

    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s = &s[1..s.len() - 1];
    }
    s = s.trim();

    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        let inner = &s[1..s.len() - 1];
        if !inner.contains('\'') {
            s = inner;
        }
    }

    s.to_string()
}

fn within_tolerance(target_total: usize, candidate: &str) -> bool {
    let actual = syllable::count_line(candidate);
    actual.abs_diff(target_total) <= 2
}

fn matches_word_pattern(required: &WordSyllables, candidate: &str) -> bool {
    let actual: Vec<usize> = syllable::analyze_line(candidate).iter().map(|(_, c)| *c).collect();
    let required_counts: Vec<usize> = required.iter().map(|(_, c)| *c).collect();
    actual == required_counts
}

struct LinePlan {
    original: String,
    total_syllables: usize,
    word_syllables: WordSyllables,
}

/// Run the full parody generation pipeline over `original_lines`.
///
/// Returns a vector the same length as `original_lines`: blank input
/// positions map to empty strings, non-blank positions to non-empty
/// generated lines (spec's output invariant).
pub fn generate(
    original_lines: &[String],
    keywords: &KeywordMap,
    config: &ParodyConfig,
    completer: &dyn TextCompleter,
    mut hooks: RunHooks,
) -> Result<Vec<String>, ParodyError> {
    completer.verify().map_err(ParodyError::CompleterUnavailable)?;

    let non_blank_lines: Vec<&str> = original_lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| l.as_str())
        .collect();
    if non_blank_lines.is_empty() {
        return Err(ParodyError::EmptyInput);
    }

    let plans: Vec<LinePlan> = non_blank_lines
        .iter()
        .map(|line| LinePlan {
            original: line.to_string(),
            total_syllables: syllable::count_line(line),
            word_syllables: syllable::analyze_line(line),
        })
        .collect();

    let (labels, scheme) = rhyme::analyze(&non_blank_lines);
    let total_non_blank = non_blank_lines.len();

    let mut ctx = ParodyContext::new();
    let mut nb_index = 0usize;

    for line in original_lines {
        if hooks.is_cancelled() {
            return Err(ParodyError::Cancelled);
        }

        if is_blank(line) {
            ctx.push_blank();
            continue;
        }

        let plan = &plans[nb_index];

        let peer_lines: Vec<String> = rhyme::peers_of(nb_index, &labels)
            .into_iter()
            .filter(|&p| p < nb_index)
            .map(|p| ctx.accepted_non_blank[p].clone())
            .collect();
        let prev_non_blank = ctx.last_non_blank(8);

        if hooks.is_cancelled() {
            return Err(ParodyError::Cancelled);
        }

        let rhyme_constraint = RhymeConstraint {
            group: &labels[nb_index],
            scheme: &scheme,
            peer_lines: &peer_lines,
        };
        let initial = prompt::initial_prompt(
            &plan.original,
            plan.total_syllables,
            keywords,
            &prev_non_blank,
            &plan.word_syllables,
            &rhyme_constraint,
        );

        let raw = completer.complete(&initial).map_err(|e| ParodyError::CompleterFailed {
            line_index: nb_index,
            detail: e.to_string(),
        })?;
        let mut candidate = sanitize(&raw);

        // Pass 1: word-syllable refinement (always attempted).
        if hooks.is_cancelled() {
            return Err(ParodyError::Cancelled);
        }
        let actual_pattern = syllable::analyze_line(&candidate);
        let ws_prompt = prompt::word_syllable_refinement_prompt(&candidate, &plan.word_syllables, &actual_pattern);
        match completer.complete(&ws_prompt) {
            Ok(raw) => {
                let refined = sanitize(&raw);
                if within_tolerance(plan.total_syllables, &refined) && matches_word_pattern(&plan.word_syllables, &refined) {
                    candidate = refined;
                } else {
                    log::warn!("line {nb_index}: word-syllable refinement rejected by validation");
                }
            }
            Err(e) => log::warn!("line {nb_index}: word-syllable refinement failed: {e}"),
        }

        // Pass 2: semantic coherence, only once prior non-blank context exists.
        if nb_index > 0 && !prev_non_blank.is_empty() {
            if hooks.is_cancelled() {
                return Err(ParodyError::Cancelled);
            }
            let sem_prompt = prompt::semantic_coherence_prompt(&candidate, &prev_non_blank, &plan.word_syllables);
            match completer.complete(&sem_prompt) {
                Ok(raw) => {
                    let refined = sanitize(&raw);
                    if within_tolerance(plan.total_syllables, &refined) && matches_word_pattern(&plan.word_syllables, &refined) {
                        candidate = refined;
                    } else {
                        log::warn!("line {nb_index}: semantic-coherence refinement rejected by validation");
                    }
                }
                Err(e) => log::warn!("line {nb_index}: semantic-coherence refinement failed: {e}"),
            }
        }

        // Remaining passes: punctuation/capitalization, up to refinement_passes - 1.
        let punctuation_passes = config.refinement_passes.saturating_sub(1);
        for _ in 0..punctuation_passes {
            if hooks.is_cancelled() {
                return Err(ParodyError::Cancelled);
            }
            let punct_prompt = prompt::punctuation_capitalization_prompt(&candidate, &plan.original);
            match completer.complete(&punct_prompt) {
                Ok(raw) => {
                    let refined = sanitize(&raw);
                    if within_tolerance(plan.total_syllables, &refined) {
                        candidate = refined;
                    } else {
                        log::warn!("line {nb_index}: punctuation refinement rejected by validation");
                    }
                }
                Err(e) => log::warn!("line {nb_index}: punctuation refinement failed: {e}"),
            }
        }

        let final_line = style::apply(&plan.original, &candidate);
        ctx.push_non_blank(final_line);
        nb_index += 1;
        hooks.report(nb_index, total_non_blank);
    }

    Ok(ctx.accepted_parody)
}
