//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application: stopwatch limits, persistence keys, and the fixed
//! action-tag vocabulary notes draw from.

// Stopwatch configuration
pub const TIMER_CEILING_MS: u64 = 24 * 60 * 60 * 1000;
pub const TIMER_TICK_INTERVAL_MS: u64 = 250;
pub const TIMER_FLUSH_INTERVAL_MS: u64 = 5_000;

/// File the stopwatch snapshot is persisted under (next to the database).
pub const TIMER_SNAPSHOT_FILE: &str = "timer_state.json";

// Action tags. Earlier releases stored the display label itself as the tag
// value, so the id and the pt-BR label are the same string and must not be
// reworded without a data migration.
pub const ACTION_ENTREGOU_PUBLICACAO: &str =
    "Entregou publicações em mãos para o morador";
pub const ACTION_DEIXOU_CARTA: &str = "Deixou carta na caixinha da casa do morador";
pub const ACTION_DEIXOU_PUBLICACAO_SEM_FALAR: &str =
    "Deixou publicação na casa do morador porém não falou com ele (Caixinha)";
pub const ACTION_ABRIU_ESTUDO: &str = "Abriu estudo com morador";
pub const ACTION_PRIMEIRA_REVISITA: &str = "Primeira Revisita";
pub const ACTION_SEGUNDA_REVISITA: &str = "Segunda Revisita";
pub const ACTION_TERCEIRA_REVISITA_ESTUDO: &str = "Terceira Revisita (Estudo)";
pub const ACTION_NAO_QUER_ESTUDO: &str = "Morador não quer mais o estudo";
pub const ACTION_PRIMEIRA_REVISITA_SF: &str =
    "Primeira Revisita (Considerando Revista \"Seja Feliz para Sempre\")";
pub const ACTION_SEGUNDA_REVISITA_SF: &str =
    "Segunda Revisita (Considerando Revista \"Seja Feliz para Sempre\")";
pub const ACTION_TERCEIRA_REVISITA_ESTUDO_SF: &str =
    "Terceira Revisita (Estudo) (Considerando Revista \"Seja Feliz para Sempre\")";

/// Full vocabulary in entry-form order.
pub const ALL_ACTIONS: &[&str] = &[
    ACTION_ENTREGOU_PUBLICACAO,
    ACTION_DEIXOU_CARTA,
    ACTION_DEIXOU_PUBLICACAO_SEM_FALAR,
    ACTION_ABRIU_ESTUDO,
    ACTION_PRIMEIRA_REVISITA,
    ACTION_SEGUNDA_REVISITA,
    ACTION_TERCEIRA_REVISITA_ESTUDO,
    ACTION_NAO_QUER_ESTUDO,
    ACTION_PRIMEIRA_REVISITA_SF,
    ACTION_SEGUNDA_REVISITA_SF,
    ACTION_TERCEIRA_REVISITA_ESTUDO_SF,
];

/// Tags whose selection means a follow-up visit is being recorded.
/// Selecting any of these opens the revisit section for data entry.
pub const REVISIT_TRIGGER_ACTIONS: &[&str] = &[
    ACTION_PRIMEIRA_REVISITA,
    ACTION_SEGUNDA_REVISITA,
    ACTION_PRIMEIRA_REVISITA_SF,
    ACTION_SEGUNDA_REVISITA_SF,
];

/// Third-visit tags. Selecting either one classifies the note as a study
/// and auto-promotes the "opened a study" tag.
pub const THIRD_VISIT_ACTIONS: &[&str] = &[
    ACTION_TERCEIRA_REVISITA_ESTUDO,
    ACTION_TERCEIRA_REVISITA_ESTUDO_SF,
];
