pub mod formatter;

pub use formatter::{
    format_comparison, format_impact, format_result, format_stats, format_tsv, format_years,
    should_use_colors,
};
