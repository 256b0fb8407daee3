//! INFO header definition for splice scores

/// INFO key carrying splice scores
pub const INFO_KEY: &str = "SpliceScore";

/// Description of the INFO field grammar
pub const INFO_DESCRIPTION: &str = "Splice gain/loss scores. Format: \
gene|gain_1|...|gain_n|loss_1|...|loss_n|gain_1_pos|...|gain_n_pos|loss_1_pos|...|loss_n_pos";

/// `##INFO` header line declaring `key`
pub fn info_header_line(key: &str) -> String {
    format!(
        "##INFO=<ID={},Number=.,Type=String,Description=\"{}\">",
        key, INFO_DESCRIPTION
    )
}

/// Whether a header line declares the INFO field `key`
pub(crate) fn declares_info(line: &str, key: &str) -> bool {
    line.strip_prefix("##INFO=<ID=")
        .and_then(|rest| rest.split(',').next())
        .is_some_and(|id| id == key)
}
