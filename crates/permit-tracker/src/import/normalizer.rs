/// Strip invisible characters and collapse whitespace runs in a CSV cell.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::normalize_text;

    #[test]
    fn collapses_whitespace_and_drops_byte_order_marks() {
        assert_eq!(
            normalize_text("\u{feff}Garage   addition \u{200b} phase 2 "),
            "Garage addition phase 2"
        );
    }
}
