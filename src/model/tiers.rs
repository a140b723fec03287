/// Ascending rating breakpoints; badge `i` covers `[BREAKPOINTS[i-1], BREAKPOINTS[i])`.
pub const RATING_BREAKPOINTS: [i32; 9] = [1000, 2000, 4000, 7000, 10000, 12000, 13000, 14000, 15000];

/// Rating badge file stems, one per ladder step.
pub const RATING_BADGE_NAMES: [&str; 10] = [
    "rating_white",
    "rating_blue",
    "rating_green",
    "rating_yellow",
    "rating_red",
    "rating_purple",
    "rating_copper",
    "rating_silver",
    "rating_gold",
    "rating_rainbow",
];

/// Number of breakpoints not exceeding `rating`, i.e. the rating badge palette index.
pub fn rating_badge_index(rating: i32) -> usize {
    RATING_BREAKPOINTS.partition_point(|&bp| bp <= rating)
}

/// Class-rank plate id as it appears in the asset tree.
///
/// Ids below 10 are zero-padded to two digits; id 22 has no plate of its own and shares 21's.
pub fn rank_badge_stem(id: u32) -> String {
    match id {
        22 => "21".to_string(),
        0..10 => format!("{id:02}"),
        _ => id.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/tiers.rs"]
mod tests;
