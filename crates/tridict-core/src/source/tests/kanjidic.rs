use std::fs;

use crate::source::{DictSource, KanjidicSource};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE kanjidic2 [
<!ELEMENT kanjidic2 (header,character*)>
]>
<kanjidic2>
<header><file_version>4</file_version></header>
<character>
<literal>猫</literal>
<codepoint><cp_value cp_type="ucs">732b</cp_value></codepoint>
<misc><grade>8</grade><stroke_count>11</stroke_count><stroke_count>12</stroke_count><freq>1702</freq></misc>
</character>
<character>
<literal>亜</literal>
<misc><stroke_count>7</stroke_count></misc>
</character>
<character>
<literal>丂</literal>
<misc></misc>
</character>
</kanjidic2>
"#;

#[test]
fn test_parse_kanjidic() {
    let map = KanjidicSource.parse(SAMPLE.as_bytes()).unwrap();
    assert_eq!(map.len(), 3);

    let neko = map["猫"];
    assert_eq!(neko.stroke_count, Some(11));
    assert_eq!(neko.grade, Some(8));

    let a = map["亜"];
    assert_eq!(a.stroke_count, Some(7));
    assert_eq!(a.grade, None);

    assert_eq!(map["丂"].stroke_count, None);
}

#[test]
fn test_missing_file_yields_empty_map() {
    let dir = tempfile::tempdir().unwrap();
    let map = KanjidicSource
        .load_optional(&dir.path().join("kanjidic2.xml"))
        .unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_load_optional_reads_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kanjidic2.xml");
    fs::write(&path, SAMPLE).unwrap();
    let map = KanjidicSource.load_optional(&path).unwrap();
    assert_eq!(map.len(), 3);
}
