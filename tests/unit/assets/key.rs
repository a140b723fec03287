use super::*;

#[test]
fn cover_lookup_id_remaps_song_ids() {
    assert_eq!(cover_lookup_id(7), "00007");
    assert_eq!(cover_lookup_id(999), "00999");
    assert_eq!(cover_lookup_id(1000), "11000");
    assert_eq!(cover_lookup_id(1234), "11234");
    assert_eq!(cover_lookup_id(9999), "19999");
    assert_eq!(cover_lookup_id(10000), "10000");
    assert_eq!(cover_lookup_id(23456), "23456");
}

#[test]
fn rel_paths_follow_resource_tree_naming() {
    assert_eq!(AssetKey::Cover("00007".into()).rel_path(), "cover/00007.png");
    assert_eq!(AssetKey::DefaultCover.rel_path(), "default_cover.png");
    assert_eq!(
        AssetKey::RankBadge(5).rel_path(),
        "rank/UI_CMN_DaniPlate_05.png"
    );
    assert_eq!(
        AssetKey::RankBadge(22).rel_path(),
        AssetKey::RankBadge(21).rel_path()
    );
    assert_eq!(AssetKey::RatingBadge(0).rel_path(), "pic/rating_white.png");
    assert_eq!(AssetKey::RatingBadge(9).rel_path(), "pic/rating_rainbow.png");
    assert_eq!(AssetKey::RateBadge("sssp".into()).rel_path(), "pic/rate_sssp.png");
    assert_eq!(AssetKey::ComboBadge("ap".into()).rel_path(), "pic/combo_ap.png");
    assert_eq!(AssetKey::SyncBadge("fsd".into()).rel_path(), "pic/sync_fsd.png");
    assert_eq!(
        AssetKey::DifficultyFrame("Re:MASTER".into()).rel_path(),
        "pic/chart_remaster.png"
    );
    assert_eq!(
        AssetKey::ChartTypeIcon(ChartType::Deluxe).rel_path(),
        "pic/chart_type_dx.png"
    );
    assert_eq!(AssetKey::CustomPlate("7".into()).rel_path(), "plate/plate_7.png");
    assert_eq!(AssetKey::UserBackground("42".into()).rel_path(), "user/42.png");
    assert_eq!(AssetKey::UserAvatar("42".into()).rel_path(), "avatar/42.png");
    assert_eq!(
        AssetKey::SheetBackground { custom: true }.rel_path(),
        "pic/b50_bg_custom.png"
    );
}

#[test]
fn covers_and_avatars_are_remote_and_only_covers_have_placeholder() {
    let cover = AssetKey::Cover("11234".into());
    assert_eq!(cover.remote_name().as_deref(), Some("11234.png"));
    assert_eq!(cover.placeholder(), Some(AssetKey::DefaultCover));

    let avatar = AssetKey::UserAvatar("42".into());
    assert_eq!(avatar.remote_name().as_deref(), Some("avatar/42.png"));
    assert_eq!(avatar.placeholder(), None);

    let badge = AssetKey::RateBadge("s".into());
    assert_eq!(badge.remote_name(), None);
    assert_eq!(badge.placeholder(), None);
}

#[test]
fn validate_rejects_traversal() {
    assert!(AssetKey::UserBackground("../etc".into()).validate().is_err());
    assert!(AssetKey::CustomPlate("a/b".into()).validate().is_err());
    assert!(AssetKey::CustomPlate(String::new()).validate().is_err());
    assert!(AssetKey::UserAvatar("..".into()).validate().is_err());
    assert!(AssetKey::Cover("00007".into()).validate().is_ok());
    assert!(AssetKey::RankBadge(3).validate().is_ok());
}
