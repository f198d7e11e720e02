// ============================================================================
// Basic Usage Example
// ============================================================================

use currency_mask::prelude::*;
use std::sync::Arc;

fn type_char(mask: &EditOrchestrator, field: &SharedField, ch: char) {
    // Mimic the host widget: apply the keystroke natively, then report it.
    {
        let mut f = field.write();
        let (cursor, _) = f.selection();
        let mut text: Vec<char> = f.text().chars().collect();
        let at = cursor.min(text.len());
        text.insert(at, ch);
        let text: String = text.into_iter().collect();
        f.set_text(text);
        f.set_cursor(at + 1);
    }
    mask.on_event(FieldEvent::Input);
}

fn main() {
    println!("=== Currency Mask Example ===\n");

    // Bind a field with the default US dollar configuration
    let field = TextField::new().into_shared();
    let mask = EditOrchestrator::new(field.clone(), MaskConfig::default())
        .with_listener(Arc::new(LoggingValueListener));

    println!("Typing 1 2 3 4 5 6 into an empty field:");
    for ch in "123456".chars() {
        type_char(&mask, &field, ch);
        println!("  field: {:<12} value: {:?}", field.read().text(), mask.value());
    }

    // Toggle the sign with a minus keystroke
    type_char(&mask, &field, '-');
    println!("\nAfter '-': {} ({:?})", field.read().text(), mask.value());

    // Select everything and backspace
    let len = field.read().text().chars().count();
    field.write().set_selection(0, len);
    mask.on_event(FieldEvent::KeyDown(Key::Backspace));
    println!("After select-all backspace: {:?}", field.read().text());

    // Reformat the same value under a different configuration
    println!("\n=== Reformatting Presets ===");
    mask.set_value(Some(Decimal::new(123456, 2)));
    for (name, config) in [
        ("us_dollar", MaskConfig::us_dollar()),
        ("euro", MaskConfig::euro()),
        ("brazilian_real", MaskConfig::brazilian_real()),
    ] {
        mask.update_configuration(config);
        println!("  {:<15} {}", name, field.read().text());
    }
}
