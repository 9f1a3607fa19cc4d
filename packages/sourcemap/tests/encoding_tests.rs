//! Maps built from segments read back through the `sourcemap` decoder

use patchmap_sourcemap::{MappingsBuilder, Segment, SourceMap};

fn decode(map: &SourceMap) -> sourcemap::SourceMap {
    let json = map.to_json().unwrap();
    sourcemap::SourceMap::from_slice(json.as_bytes()).unwrap()
}

#[test]
fn test_multi_line_map_decodes_identically() {
    let mut builder = MappingsBuilder::new();
    builder.add_mapping(0, 0, None);
    builder.advance("var answer");
    builder.add_mapping(0, 12, Some(0));
    builder.advance(" = 42;\n");
    builder.add_mapping(3, 4, None);
    builder.advance("log(answer);\n\n");
    builder.add_mapping(1, 0, Some(0));

    let lines = builder.into_lines();
    let map = SourceMap::from_segments(None, Some("input.js"), None, &["answer"], &lines);
    assert_eq!(map.segments(), lines);

    let decoded = decode(&map);

    let ours: Vec<(u32, u32, u32, u32, Option<String>)> = lines
        .iter()
        .enumerate()
        .flat_map(|(line, segments)| {
            segments.iter().map(move |s: &Segment| {
                (
                    line as u32,
                    s.generated_column,
                    s.source_line,
                    s.source_column,
                    s.name_index.map(|_| "answer".to_string()),
                )
            })
        })
        .collect();

    let theirs: Vec<(u32, u32, u32, u32, Option<String>)> = decoded
        .tokens()
        .map(|t| {
            (
                t.get_dst_line(),
                t.get_dst_col(),
                t.get_src_line(),
                t.get_src_col(),
                t.get_name().map(str::to_string),
            )
        })
        .collect();

    assert_eq!(ours, theirs);
    assert_eq!(decoded.get_source(0), Some("input.js"));
}

#[test]
fn test_large_deltas() {
    let lines = vec![vec![Segment {
        generated_column: 70_000,
        source_index: 0,
        source_line: 12_345,
        source_column: 999,
        name_index: None,
    }]];

    let map = SourceMap::from_segments(None, Some("a.js"), None, &[], &lines);
    assert_eq!(map.segments(), lines);

    let decoded = decode(&map);
    let token = decoded.get_token(0).unwrap();
    assert_eq!(token.get_dst_col(), 70_000);
    assert_eq!(token.get_src_line(), 12_345);
    assert_eq!(token.get_src_col(), 999);
}

#[test]
fn test_from_json_reads_foreign_maps() {
    let json = r#"{"version":3,"sources":["coolstuff.js"],"names":["x","alert"],"mappings":"AAAA,GAAIA,GAAI,EACR,IAAIA"}"#;
    let map = SourceMap::from_json(json).unwrap();

    let segments = map.segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 5);
    assert_eq!(segments[0][3].source_line, 1);
    assert_eq!(segments[0][1].name_index, Some(0));
    assert_eq!(map.mappings().unwrap(), "AAAA,GAAIA,GAAI,EACR,IAAIA");
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(SourceMap::from_json("{not json").is_err());
}
