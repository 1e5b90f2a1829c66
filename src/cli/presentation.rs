//! CLI presentation: text and json formatters per command family.

mod context;

pub use context::{
    format_context_create_result, format_context_inspect_result_json,
    format_context_inspect_result_text, format_context_list_result_json,
    format_context_list_result_text,
};
