use cpset::prelude::*;

#[test]
fn prelude_builds_every_encoding() {
    let table: &[(u32, u32)] = &[(0x41, 0x5A), (0x4100, 0x42FF), (0x1F600, 0x1F64F)];
    let subsets = [
        RangedSubsetBuilder::new().include_code_point_ranges(table).build(),
        BlockSubsetBuilder::new().include_code_point_ranges(table).build(),
        HashSubsetBuilder::new().include_code_point_ranges(table).build(),
        OptimalHashSubsetBuilder::new().include_code_point_ranges(table).build(),
    ];
    for s in &subsets {
        assert!(s.contains(0x41FF), "{}", s.encoding());
        assert!(!s.contains(0x4300), "{}", s.encoding());
        assert_eq!(s.code_point_count(), 26 + 0x200 + 0x50);
    }
    let encodings: Vec<_> = subsets.iter().map(|s| s.encoding()).collect();
    assert_eq!(encodings, ["ranged", "block", "hash", "optimal-hash"]);
}

#[test]
fn untrusted_bounds_are_checked() {
    assert!(CodePointRange::try_new(0x41, MAX_CODE_POINT + 1).is_err());
    let r = CodePointRange::try_new(0x5A, 0x41).unwrap();
    let s = HashSubsetBuilder::with_config(HashConfig::new(8))
        .unwrap()
        .include_code_point_range(r.start(), r.end())
        .build();
    assert!(s.contains_char('M'));
}
