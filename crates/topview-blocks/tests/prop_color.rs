use proptest::prelude::*;
use topview_blocks::{BlockPalette, Rgb};

fn rgb() -> impl Strategy<Value = Rgb> {
    any::<[u8; 3]>().prop_map(Rgb)
}

proptest! {
    // offset moves each channel independently and never leaves [0, 255]
    #[test]
    fn offset_clamps_per_channel(c in rgb(), delta in -300i32..=300) {
        let out = c.offset(delta);
        for i in 0..3 {
            let expect = (i32::from(c.0[i]) + delta).clamp(0, 255);
            prop_assert_eq!(i32::from(out.0[i]), expect);
        }
    }

    #[test]
    fn zero_offset_is_identity(c in rgb()) {
        prop_assert_eq!(c.offset(0), c);
    }

    // inserted names are found with or without the vanilla namespace
    #[test]
    fn insert_then_lookup(name in "[a-z_]{1,24}", c in rgb()) {
        let mut palette = BlockPalette::new();
        palette.insert(&format!("minecraft:{name}"), c);
        prop_assert_eq!(palette.lookup(&name), Some(c));
        prop_assert_eq!(palette.lookup(&format!("minecraft:{name}")), Some(c));
    }
}

#[test]
fn table_and_array_forms_agree() {
    let palette = BlockPalette::from_toml_str(
        r#"
        [colors]
        a = [10, 20, 30]
        b = { r = 10, g = 20, b = 30 }
    "#,
    )
    .unwrap();
    assert_eq!(palette.lookup("a"), palette.lookup("b"));
    assert_eq!(palette.lookup("a"), Some(Rgb::new(10, 20, 30)));
}
