//! Edge case and error handling tests for ricecake


use harness::TestChannel;
use ricecake::{
    BuilderConfig, ChannelBuilder, ChannelError, ConfigFile, ErrorKind, Node, ParseError, Warning,
    construct_channel,
};
#[cfg(unix)]
use std::os::unix::fs::symlink;

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_symlinked_topic_skipped_by_default() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[real]\ntitle = Real\n[link]\ntitle = Link\n");
    channel.add_metadata("content/real", "");
    symlink(channel.path().join("content/real"), channel.path().join("content/link"))
        .expect("Failed to create symlink");

    let output = construct_channel(channel.path()).unwrap();
    let ids: Vec<&str> = output.channel.children.iter().map(Node::source_id).collect();
    assert_eq!(ids, vec!["real"]);
    assert!(matches!(
        &output.warnings[..],
        [Warning::SymlinkSkipped { path }] if path.ends_with("link")
    ));
}

#[test]
#[cfg(unix)]
fn test_symlinked_topic_followed_when_enabled() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[real]\ntitle = Real\n[link]\ntitle = Link\n");
    channel.add_metadata("content/real", "");
    symlink(channel.path().join("content/real"), channel.path().join("content/link"))
        .expect("Failed to create symlink");

    let builder = ChannelBuilder::new(BuilderConfig {
        follow_symlinks: true,
        ..Default::default()
    });
    let output = builder.construct_collecting(channel.path()).unwrap();
    assert_eq!(output.channel.children.len(), 2);
    assert!(output.warnings.is_empty());
}

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_does_not_recurse() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[loop]\ntitle = Loop\n");
    symlink("..", channel.path().join("content/loop")).expect("Failed to create parent symlink");

    let output = construct_channel(channel.path()).unwrap();
    assert!(output.channel.children.is_empty());
    assert_eq!(output.warnings.len(), 1);
}

#[test]
#[cfg(unix)]
fn test_unconfigured_symlink_reports_missing_config() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "");
    symlink("nowhere.mp4", channel.path().join("content/broken.mp4"))
        .expect("Failed to create broken symlink");

    let output = construct_channel(channel.path()).unwrap();
    assert!(matches!(
        &output.warnings[..],
        [Warning::MissingEntryConfig { .. }]
    ));
}

// ============================================================================
// Naming Edge Cases
// ============================================================================

#[test]
fn test_dotted_file_name_uses_last_extension() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[lesson.part1]\ntitle = Part 1\n");
    channel.add_media("content/lesson.part1.mp4");

    let output = construct_channel(channel.path()).unwrap();
    assert_eq!(output.channel.children[0].source_id(), "lesson.part1");
}

#[test]
fn test_dotted_directory_looked_up_by_base_name() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[unit]\ntitle = Unit\n");
    channel.add_metadata("content/unit.01", "");

    let output = construct_channel(channel.path()).unwrap();
    assert!(output.channel.children[0].is_topic());
}

#[test]
fn test_uppercase_extension_recognized() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[clip]\ntitle = Clip\n");
    channel.add_media("content/clip.MP4");

    let output = construct_channel(channel.path()).unwrap();
    assert!(matches!(output.channel.children[0], Node::Video(_)));
}

#[test]
fn test_extensionless_file_with_section_skipped() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[README]\ntitle = Readme\n");
    channel.add_media("content/README");

    let output = construct_channel(channel.path()).unwrap();
    assert!(output.channel.children.is_empty());
    assert!(output.warnings.is_empty());
}

#[test]
fn test_two_files_sharing_a_section() {
    // Both entries match [talk] and would get the same source id
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[talk]\ntitle = Talk\n");
    channel.add_media("content/talk.mp3");
    channel.add_media("content/talk.mp4");

    let err = construct_channel(channel.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert!(matches!(
        err,
        ChannelError::DuplicateSourceId { ref id, .. } if id == "talk"
    ));
}

#[test]
#[cfg(unix)]
fn test_symlinked_content_folder_warns() {
    let elsewhere = TestChannel::new();
    elsewhere.add_metadata("content", "");
    let channel = TestChannel::with_channel_config();
    symlink(elsewhere.path().join("content"), channel.path().join("content"))
        .expect("Failed to create symlink");

    let mut warnings: Vec<Warning> = Vec::new();
    let err = ChannelBuilder::default()
        .construct(channel.path(), &mut warnings)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStructure);
    assert!(matches!(
        &warnings[..],
        [Warning::SymlinkSkipped { path }] if path.ends_with("content")
    ));
}

#[test]
#[cfg(unix)]
fn test_symlinked_content_folder_followed_when_enabled() {
    let elsewhere = TestChannel::new();
    elsewhere.add_metadata("content", "");
    let channel = TestChannel::with_channel_config();
    symlink(elsewhere.path().join("content"), channel.path().join("content"))
        .expect("Failed to create symlink");

    let builder = ChannelBuilder::new(BuilderConfig {
        follow_symlinks: true,
        ..Default::default()
    });
    let output = builder.construct_collecting(channel.path()).unwrap();
    assert!(output.channel.children.is_empty());
    assert!(output.warnings.is_empty());
}

// ============================================================================
// Configuration Edge Cases
// ============================================================================

#[test]
fn test_defaults_apply_to_entries() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata(
        "content",
        "[DEFAULT]\nlicense = CC BY-SA\nauthor = Team\n\n[clip]\ntitle = Clip\nauthor = Ada\n",
    );
    channel.add_media("content/clip.mp4");

    let output = construct_channel(channel.path()).unwrap();
    let clip = output.channel.children[0].content().unwrap();
    assert_eq!(clip.license.as_deref(), Some("CC BY-SA"));
    assert_eq!(clip.author.as_deref(), Some("Ada"));
}

#[test]
fn test_empty_option_name_does_not_break_entry() {
    let config = ConfigFile::parse("[a]\n= value\nx = 1\n").unwrap();
    let section = config.section("a").unwrap();
    assert_eq!(section.get(""), Some("value"));
    assert_eq!(section.get("x"), Some("1"));

    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[clip]\n= stray\ntitle = Clip\n");
    channel.add_media("content/clip.mp4");
    let output = construct_channel(channel.path()).unwrap();
    assert_eq!(output.channel.children[0].title(), "Clip");
}

#[test]
fn test_windows_line_endings() {
    let config = ConfigFile::parse("[clip]\r\ntitle = Clip\r\n").unwrap();
    assert_eq!(config.section("clip").unwrap().get("title"), Some("Clip"));
}

#[test]
fn test_malformed_lines_listed_in_order() {
    let err = ConfigFile::parse("[a]\nfirst bad\n[b]\nsecond bad\n").unwrap_err();
    let ParseError::Malformed { lines } = &err else {
        panic!("expected malformed error, got {err:?}");
    };
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].line, lines[1].line), (2, 4));
    let message = err.to_string();
    assert!(message.contains("first bad") && message.contains("second bad"));
}

#[test]
fn test_continuation_after_header_only_is_option_line() {
    let err = ConfigFile::parse("[a]\n   just text\n").unwrap_err();
    assert!(matches!(err, ParseError::Malformed { .. }));
}

#[test]
fn test_unicode_titles() {
    let channel = TestChannel::with_channel_config();
    channel.add_metadata("content", "[vidéo]\ntitle = Présentation 日本語\n");
    channel.add_media("content/vidéo.mp4");

    let output = construct_channel(channel.path()).unwrap();
    assert_eq!(output.channel.children[0].title(), "Présentation 日本語");
}
