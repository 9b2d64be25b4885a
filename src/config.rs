use crate::log::{LogLevel, DEFAULT_LOG_LEVEL};

pub const DEFAULT_STAR_COUNT: usize = 800;
pub const DEFAULT_PARTICLE_COUNT: usize = 150;
pub const DEFAULT_TYPEWRITER_DELAY_MS: u32 = 400;
pub const DEFAULT_TYPEWRITER_SPEED_MS: u32 = 36;
pub const DEFAULT_CONFETTI_COUNT: usize = 40;

const STAR_COUNT_BOUNDS: (usize, usize) = (0, 5_000);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 2_000);
const TYPEWRITER_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const TYPEWRITER_SPEED_MS_BOUNDS: (u32, u32) = (1, 1_000);
const CONFETTI_COUNT_BOUNDS: (usize, usize) = (0, 400);

/// Page tunables. Overrides come from `data-*` attributes on `<html>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub star_count: usize,
    pub particle_count: usize,
    pub typewriter_delay_ms: u32,
    pub typewriter_speed_ms: u32,
    pub confetti_count: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            star_count: DEFAULT_STAR_COUNT,
            particle_count: DEFAULT_PARTICLE_COUNT,
            typewriter_delay_ms: DEFAULT_TYPEWRITER_DELAY_MS,
            typewriter_speed_ms: DEFAULT_TYPEWRITER_SPEED_MS,
            confetti_count: DEFAULT_CONFETTI_COUNT,
        }
    }
}

impl SiteConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("data-log-level")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            log_level,
            star_count: parse_usize_with_bounds(
                &lookup,
                "data-star-count",
                DEFAULT_STAR_COUNT,
                STAR_COUNT_BOUNDS,
            ),
            particle_count: parse_usize_with_bounds(
                &lookup,
                "data-particle-count",
                DEFAULT_PARTICLE_COUNT,
                PARTICLE_COUNT_BOUNDS,
            ),
            typewriter_delay_ms: parse_u32_with_bounds(
                &lookup,
                "data-typewriter-delay-ms",
                DEFAULT_TYPEWRITER_DELAY_MS,
                TYPEWRITER_DELAY_MS_BOUNDS,
            ),
            typewriter_speed_ms: parse_u32_with_bounds(
                &lookup,
                "data-typewriter-speed-ms",
                DEFAULT_TYPEWRITER_SPEED_MS,
                TYPEWRITER_SPEED_MS_BOUNDS,
            ),
            confetti_count: parse_usize_with_bounds(
                &lookup,
                "data-confetti-count",
                DEFAULT_CONFETTI_COUNT,
                CONFETTI_COUNT_BOUNDS,
            ),
        }
    }
}

fn parse_usize_with_bounds<F>(
    lookup: &F,
    name: &str,
    default: usize,
    bounds: (usize, usize),
) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_u32_with_bounds<F>(lookup: &F, name: &str, default: u32, bounds: (u32, u32)) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
