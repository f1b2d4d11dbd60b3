/// Marker replaced by the running counter.
pub const POSITION_8: &str = "{POSITION_8}";

/// Marker replaced by the derived `yyyyMMdd` date.
pub const POSITION_9: &str = "{POSITION_9}";

/// The fixed payment record every generated row is built from.
pub const TEMPLATE: &str = "31024000,,Template001,F15-796-514200,Internal Transfer,INR,{POSITION_8},+{POSITION_9},Cust_Ref_0001,1,,,,,,,,,,,,,,,,,,,SG123456789012345678,,Beneficiary_1,Beneficiary_2,Townsville,Bank Branch,,,,,,,SBIN0000001,,,,,,State Bank,,,,,,,,,,,,2,,,,,,,,,,,H2H UFF Test file,,,,,,,abc@gmail.com,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,Individual Debit,Y,Invoice Date|Invoice No|Description|Amount~20230801|INV001|Goods|1000.00";

/// Line terminator of the host platform.
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Renders one record. Both markers occur exactly once in [`TEMPLATE`].
pub fn render_row(counter: u64, date: &str) -> String {
    TEMPLATE
        .replacen(POSITION_8, &counter.to_string(), 1)
        .replacen(POSITION_9, date, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_occur_once() {
        assert_eq!(TEMPLATE.matches(POSITION_8).count(), 1);
        assert_eq!(TEMPLATE.matches(POSITION_9).count(), 1);
    }

    #[test]
    fn test_render_row() {
        let row = render_row(2000, "20261020");
        assert!(row.starts_with("31024000,,Template001,F15-796-514200,Internal Transfer,INR,2000,+20261020,Cust_Ref_0001,"));
        assert!(!row.contains('{'));
        assert!(row.ends_with("Goods|1000.00"));
    }

    #[test]
    fn test_render_row_reverses_to_template() {
        let row = render_row(2417, "20270101");
        let restored = row
            .replacen(",2417,", &format!(",{},", POSITION_8), 1)
            .replacen("+20270101", &format!("+{}", POSITION_9), 1);
        assert_eq!(restored, TEMPLATE);
    }
}
