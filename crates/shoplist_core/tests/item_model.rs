use shoplist_core::{normalize_item_name, Item, ItemValidationError};

#[test]
fn item_new_normalizes_and_starts_unchecked() {
    let item = Item::new("  milk ").unwrap();

    assert_eq!(item.name, "Milk");
    assert!(!item.checked);
}

#[test]
fn item_new_keeps_remainder_as_typed() {
    assert_eq!(Item::new("galettes BRETONNES").unwrap().name, "Galettes BRETONNES");
    assert_eq!(Item::new("\tcidre brut\n").unwrap().name, "Cidre brut");
}

#[test]
fn item_new_rejects_blank_names() {
    assert_eq!(Item::new("").unwrap_err(), ItemValidationError::EmptyName);
    assert_eq!(Item::new("   ").unwrap_err(), ItemValidationError::EmptyName);
    assert_eq!(
        normalize_item_name("\u{3000}").unwrap_err().to_string(),
        "item name cannot be empty"
    );
}

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let item = Item::with_state("Beurre salé", true);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "Beurre salé", "checked": true }));

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn item_deserialization_accepts_sheet_column_names() {
    let decoded: Item =
        serde_json::from_value(serde_json::json!({ "nom": "Cidre", "coche": false })).unwrap();
    assert_eq!(decoded, Item::with_state("Cidre", false));

    let defaulted: Item = serde_json::from_value(serde_json::json!({ "name": "Eggs" })).unwrap();
    assert!(!defaulted.checked);
}
