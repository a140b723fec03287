use super::*;

const RECORD: &str = r#"{
    "additional_rating": 22,
    "nickname": "player",
    "plate": "舞舞舞",
    "rating": 14321,
    "username": "player",
    "charts": {
        "sd": [
            {
                "achievements": 100.5,
                "ds": 13.7,
                "dxScore": 2000,
                "fc": "fcp",
                "fs": "",
                "level": "13+",
                "level_index": 3,
                "level_label": "Master",
                "ra": 308,
                "rate": "sssp",
                "song_id": 834,
                "title": "PANDORA PARADOXXX",
                "type": "SD"
            }
        ],
        "dx": []
    }
}"#;

#[test]
fn parses_ranking_service_record() {
    let profile = PlayerProfile::from_json_slice(RECORD.as_bytes()).unwrap();
    assert_eq!(profile.nickname, "player");
    assert_eq!(profile.rating, 14321);
    assert_eq!(profile.additional_rating_tier, 22);
    assert_eq!(profile.plate_text, "舞舞舞");
    assert_eq!(profile.custom_plate_id, None);

    let sd = profile.entries(SheetSection::Standard);
    assert_eq!(sd.len(), 1);
    assert_eq!(sd[0].chart_type, ChartType::Standard);
    assert_eq!(sd[0].difficulty_index, 3);
    assert_eq!(sd[0].full_combo_tier.as_deref(), Some("fcp"));
    assert_eq!(sd[0].full_sync_tier, None);
    assert!(profile.entries(SheetSection::Deluxe).is_empty());
}

#[test]
fn null_plate_and_missing_charts_default() {
    let json = r#"{"nickname":"n","rating":0,"additional_rating":0,"plate":null}"#;
    let profile = PlayerProfile::from_json_slice(json.as_bytes()).unwrap();
    assert_eq!(profile.plate_text, "");
    assert!(profile.charts.standard.is_empty());
    assert!(profile.charts.deluxe.is_empty());
}

#[test]
fn unknown_chart_type_is_rejected() {
    let json = RECORD.replace(r#""type": "SD""#, r#""type": "XX""#);
    assert!(PlayerProfile::from_json_slice(json.as_bytes()).is_err());
}

#[test]
fn out_of_range_level_index_is_rejected_at_parse() {
    let json = RECORD.replace(r#""level_index": 3"#, r#""level_index": 7"#);
    let err = PlayerProfile::from_json_slice(json.as_bytes()).unwrap_err();
    assert!(matches!(err, crate::SheetError::Profile(_)), "{err}");
    let msg = err.to_string();
    assert!(msg.contains("level_index 7"), "{msg}");
    assert!(msg.contains("PANDORA PARADOXXX"), "{msg}");

    let top = RECORD.replace(r#""level_index": 3"#, r#""level_index": 4"#);
    assert!(PlayerProfile::from_json_slice(top.as_bytes()).is_ok());
}
