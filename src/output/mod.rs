pub mod formatter;

pub use formatter::{
    format_amount, format_curve_table, format_json, format_result_detail, format_results_table,
    format_score, format_tsv, should_use_colors,
};
