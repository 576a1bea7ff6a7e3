//! Field-selector trees and their serialization into the `fields` query
//! parameter.
//!
//! Most endpoints let the caller pick which (possibly nested) response fields
//! the server should include, using a compact selector syntax like
//! `alternative_titles,my_list_status{status,score}`. [FieldSpec] is the
//! tree form of such a selector and [`FieldSpec::serialize`] produces the wire
//! string. The typed field sets further down ([AnimeFields], [MangaFields],
//! [UserInfoFields] and friends) mirror the sets the server documents and all
//! convert into a [FieldSpec].
//!
//! All selectors here can be constructed with the builder syntax from the
//! [bon] crate.

use bon::Builder;
use serde::{Serialize, Serializer};

use std::fmt;

/// Presence of a single field in a [FieldSpec].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Select {
    /// Field is not requested. Equivalent to leaving the entry out entirely
    #[default]
    Omit,
    /// Field is requested without sub-field selection
    Include,
    /// Field is requested together with a selection of its sub-fields
    Nested(FieldSpec),
}

impl From<bool> for Select {
    fn from(on: bool) -> Self {
        if on {
            Select::Include
        } else {
            Select::Omit
        }
    }
}

impl From<FieldSpec> for Select {
    fn from(spec: FieldSpec) -> Self {
        Select::Nested(spec)
    }
}

/// Ordered field-presence tree.
///
/// Entries keep their insertion order, which makes the serialized form
/// deterministic. Keys are opaque identifiers; the upstream syntax has no
/// escaping, so keys containing `{`, `}` or `,` are not supported and are
/// passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    entries: Vec<(String, Select)>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. [`Select::Omit`] entries are kept in the tree but
    /// never serialized
    pub fn insert(&mut self, key: impl Into<String>, select: impl Into<Select>) {
        self.entries.push((key.into(), select.into()));
    }

    /// Chaining variant of [`insert`](FieldSpec::insert)
    pub fn with(mut self, key: impl Into<String>, select: impl Into<Select>) -> Self {
        self.insert(key, select);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the tree into the selector syntax
    /// `entry (',' entry)*` with `entry := key | key '{' selector '}'`.
    ///
    /// Omitted entries are skipped. A nested spec whose own serialization is
    /// empty collapses to the bare key: the field is requested but no
    /// sub-field selection is sent. Pure and deterministic
    pub fn serialize(&self) -> String {
        let mut parts = Vec::new();

        for (key, select) in &self.entries {
            match select {
                Select::Omit => {}
                Select::Include => parts.push(key.clone()),
                Select::Nested(spec) => {
                    let inner = spec.serialize();

                    if inner.is_empty() {
                        parts.push(key.clone());
                    } else {
                        parts.push(format!("{key}{{{inner}}}"));
                    }
                }
            }
        }

        parts.join(",")
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl Serialize for FieldSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.serialize())
    }
}

/// Selection for a field that can itself carry a nested field set, like
/// `my_list_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubFields<F> {
    #[default]
    Omit,
    Include,
    Fields(F),
}

impl<F> From<bool> for SubFields<F> {
    fn from(on: bool) -> Self {
        if on {
            SubFields::Include
        } else {
            SubFields::Omit
        }
    }
}

impl From<AnimeListStatusFields> for SubFields<AnimeListStatusFields> {
    fn from(fields: AnimeListStatusFields) -> Self {
        SubFields::Fields(fields)
    }
}

impl From<MangaListStatusFields> for SubFields<MangaListStatusFields> {
    fn from(fields: MangaListStatusFields) -> Self {
        SubFields::Fields(fields)
    }
}

impl<F> SubFields<F> {
    fn to_select(&self, spec: impl FnOnce(&F) -> FieldSpec) -> Select {
        match self {
            SubFields::Omit => Select::Omit,
            SubFields::Include => Select::Include,
            SubFields::Fields(fields) => Select::Nested(spec(fields)),
        }
    }
}

macro_rules! flag_fields {
    ($spec:expr, $fields:expr, [$($name:ident),* $(,)?]) => {
        $(
            if $fields.$name {
                $spec.insert(stringify!($name), Select::Include);
            }
        )*
    };
}

/// Serializes a typed field set through its [FieldSpec] form. All field sets
/// below serialize as their selector string so that they can be embedded
/// directly into query structs.
macro_rules! serialize_as_spec {
    ($($t:ty),* $(,)?) => {
        $(
            impl Serialize for $t {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(&self.to_spec().serialize())
                }
            }

            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.to_spec().serialize())
                }
            }
        )*
    };
}

/// Sub-fields of `my_list_status`/`list_status` on anime entries.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimeListStatusFields {
    #[builder(default)]
    pub status: bool,
    #[builder(default)]
    pub score: bool,
    #[builder(default)]
    pub num_episodes_watched: bool,
    #[builder(default)]
    pub is_rewatching: bool,
    #[builder(default)]
    pub start_date: bool,
    #[builder(default)]
    pub finish_date: bool,
    #[builder(default)]
    pub priority: bool,
    #[builder(default)]
    pub num_times_rewatched: bool,
    #[builder(default)]
    pub rewatch_value: bool,
    #[builder(default)]
    pub tags: bool,
    #[builder(default)]
    pub comments: bool,
    #[builder(default)]
    pub updated_at: bool,
}

impl AnimeListStatusFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new();

        flag_fields!(
            spec,
            self,
            [
                status,
                score,
                num_episodes_watched,
                is_rewatching,
                start_date,
                finish_date,
                priority,
                num_times_rewatched,
                rewatch_value,
                tags,
                comments,
                updated_at,
            ]
        );

        spec
    }
}

/// Field set accepted by the anime list, ranking and seasonal endpoints.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimeFields {
    #[builder(default)]
    pub alternative_titles: bool,
    #[builder(default)]
    pub start_date: bool,
    #[builder(default)]
    pub end_date: bool,
    #[builder(default)]
    pub synopsis: bool,
    #[builder(default)]
    pub mean: bool,
    #[builder(default)]
    pub rank: bool,
    #[builder(default)]
    pub popularity: bool,
    #[builder(default)]
    pub num_list_users: bool,
    #[builder(default)]
    pub num_scoring_users: bool,
    #[builder(default)]
    pub nsfw: bool,
    #[builder(default)]
    pub genres: bool,
    #[builder(default)]
    pub created_at: bool,
    #[builder(default)]
    pub updated_at: bool,
    #[builder(default)]
    pub media_type: bool,
    #[builder(default)]
    pub status: bool,
    #[builder(default, into)]
    pub my_list_status: SubFields<AnimeListStatusFields>,
    #[builder(default)]
    pub num_episodes: bool,
    #[builder(default)]
    pub start_season: bool,
    #[builder(default)]
    pub broadcast: bool,
    #[builder(default)]
    pub source: bool,
    #[builder(default)]
    pub average_episode_duration: bool,
    #[builder(default)]
    pub rating: bool,
    #[builder(default)]
    pub studios: bool,
}

impl AnimeFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new();

        flag_fields!(
            spec,
            self,
            [
                alternative_titles,
                start_date,
                end_date,
                synopsis,
                mean,
                rank,
                popularity,
                num_list_users,
                num_scoring_users,
                nsfw,
                genres,
                created_at,
                updated_at,
                media_type,
                status,
            ]
        );

        spec.insert(
            "my_list_status",
            self.my_list_status.to_select(AnimeListStatusFields::to_spec),
        );

        flag_fields!(
            spec,
            self,
            [
                num_episodes,
                start_season,
                broadcast,
                source,
                average_episode_duration,
                rating,
                studios,
            ]
        );

        spec
    }
}

/// Extra fields only available on the anime details endpoint.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailedAnimeFields {
    #[builder(default)]
    pub base: AnimeFields,
    #[builder(default)]
    pub pictures: bool,
    #[builder(default)]
    pub background: bool,
    #[builder(default)]
    pub related_anime: bool,
    #[builder(default)]
    pub related_manga: bool,
    #[builder(default)]
    pub recommendations: bool,
    #[builder(default)]
    pub statistics: bool,
}

impl DetailedAnimeFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = self.base.to_spec();

        flag_fields!(
            spec,
            self,
            [
                pictures,
                background,
                related_anime,
                related_manga,
                recommendations,
                statistics,
            ]
        );

        spec
    }
}

/// [AnimeFields] plus the per-entry `list_status` of a user's anime list.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAnimeListFields {
    #[builder(default)]
    pub base: AnimeFields,
    #[builder(default, into)]
    pub list_status: SubFields<AnimeListStatusFields>,
}

impl UserAnimeListFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = self.base.to_spec();

        spec.insert(
            "list_status",
            self.list_status.to_select(AnimeListStatusFields::to_spec),
        );

        spec
    }
}

/// Sub-fields of `my_list_status`/`list_status` on manga entries.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct MangaListStatusFields {
    #[builder(default)]
    pub status: bool,
    #[builder(default)]
    pub score: bool,
    #[builder(default)]
    pub num_volumes_read: bool,
    #[builder(default)]
    pub num_chapters_read: bool,
    #[builder(default)]
    pub is_rereading: bool,
    #[builder(default)]
    pub start_date: bool,
    #[builder(default)]
    pub finish_date: bool,
    #[builder(default)]
    pub priority: bool,
    #[builder(default)]
    pub num_times_reread: bool,
    #[builder(default)]
    pub reread_value: bool,
    #[builder(default)]
    pub tags: bool,
    #[builder(default)]
    pub comments: bool,
    #[builder(default)]
    pub updated_at: bool,
}

impl MangaListStatusFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new();

        flag_fields!(
            spec,
            self,
            [
                status,
                score,
                num_volumes_read,
                num_chapters_read,
                is_rereading,
                start_date,
                finish_date,
                priority,
                num_times_reread,
                reread_value,
                tags,
                comments,
                updated_at,
            ]
        );

        spec
    }
}

/// Field set accepted by the manga list and ranking endpoints.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct MangaFields {
    #[builder(default)]
    pub alternative_titles: bool,
    #[builder(default)]
    pub start_date: bool,
    #[builder(default)]
    pub end_date: bool,
    #[builder(default)]
    pub synopsis: bool,
    #[builder(default)]
    pub mean: bool,
    #[builder(default)]
    pub rank: bool,
    #[builder(default)]
    pub popularity: bool,
    #[builder(default)]
    pub num_list_users: bool,
    #[builder(default)]
    pub num_scoring_users: bool,
    #[builder(default)]
    pub nsfw: bool,
    #[builder(default)]
    pub genres: bool,
    #[builder(default)]
    pub created_at: bool,
    #[builder(default)]
    pub updated_at: bool,
    #[builder(default)]
    pub media_type: bool,
    #[builder(default)]
    pub status: bool,
    #[builder(default, into)]
    pub my_list_status: SubFields<MangaListStatusFields>,
    #[builder(default)]
    pub num_volumes: bool,
    #[builder(default)]
    pub num_chapters: bool,
    #[builder(default)]
    pub authors: bool,
}

impl MangaFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new();

        flag_fields!(
            spec,
            self,
            [
                alternative_titles,
                start_date,
                end_date,
                synopsis,
                mean,
                rank,
                popularity,
                num_list_users,
                num_scoring_users,
                nsfw,
                genres,
                created_at,
                updated_at,
                media_type,
                status,
            ]
        );

        spec.insert(
            "my_list_status",
            self.my_list_status.to_select(MangaListStatusFields::to_spec),
        );

        flag_fields!(spec, self, [num_volumes, num_chapters, authors]);

        spec
    }
}

/// Extra fields only available on the manga details endpoint.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailedMangaFields {
    #[builder(default)]
    pub base: MangaFields,
    #[builder(default)]
    pub pictures: bool,
    #[builder(default)]
    pub background: bool,
    #[builder(default)]
    pub related_anime: bool,
    #[builder(default)]
    pub related_manga: bool,
    #[builder(default)]
    pub recommendations: bool,
    #[builder(default)]
    pub serialization: bool,
}

impl DetailedMangaFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = self.base.to_spec();

        flag_fields!(
            spec,
            self,
            [
                pictures,
                background,
                related_anime,
                related_manga,
                recommendations,
                serialization,
            ]
        );

        spec
    }
}

/// [MangaFields] plus the per-entry `list_status` of a user's manga list.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMangaListFields {
    #[builder(default)]
    pub base: MangaFields,
    #[builder(default, into)]
    pub list_status: SubFields<MangaListStatusFields>,
}

impl UserMangaListFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = self.base.to_spec();

        spec.insert(
            "list_status",
            self.list_status.to_select(MangaListStatusFields::to_spec),
        );

        spec
    }
}

/// Field set accepted by the user info endpoint.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfoFields {
    #[builder(default)]
    pub id: bool,
    #[builder(default)]
    pub name: bool,
    #[builder(default)]
    pub picture: bool,
    #[builder(default)]
    pub gender: bool,
    #[builder(default)]
    pub birthday: bool,
    #[builder(default)]
    pub location: bool,
    #[builder(default)]
    pub joined_at: bool,
    #[builder(default)]
    pub anime_statistics: bool,
    #[builder(default)]
    pub time_zone: bool,
    #[builder(default)]
    pub is_supported: bool,
}

impl UserInfoFields {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new();

        flag_fields!(
            spec,
            self,
            [
                id,
                name,
                picture,
                gender,
                birthday,
                location,
                joined_at,
                anime_statistics,
                time_zone,
                is_supported,
            ]
        );

        spec
    }
}

serialize_as_spec!(
    AnimeListStatusFields,
    AnimeFields,
    DetailedAnimeFields,
    UserAnimeListFields,
    MangaListStatusFields,
    MangaFields,
    DetailedMangaFields,
    UserMangaListFields,
    UserInfoFields,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec() {
        assert_eq!(FieldSpec::new().serialize(), "");
    }

    #[test]
    fn test_omitted_entries_are_skipped() {
        let spec = FieldSpec::new()
            .with("a", true)
            .with("b", false)
            .with("c", Select::Omit);

        assert_eq!(spec.serialize(), "a");
    }

    #[test]
    fn test_nested_spec() {
        let spec = FieldSpec::new()
            .with("a", true)
            .with("b", FieldSpec::new().with("c", true).with("d", false));

        assert_eq!(spec.serialize(), "a,b{c}");
    }

    #[test]
    fn test_all_omitted_nested_spec_collapses_to_bare_key() {
        let spec = FieldSpec::new().with("a", FieldSpec::new().with("b", false));

        assert_eq!(spec.serialize(), "a");
    }

    #[test]
    fn test_multi_level_nesting() {
        let spec = FieldSpec::new().with(
            "a",
            FieldSpec::new().with("b", FieldSpec::new().with("c", true)),
        );

        assert_eq!(spec.serialize(), "a{b{c}}");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let spec = FieldSpec::new()
            .with("b", true)
            .with("a", FieldSpec::new().with("z", true).with("y", true));

        assert_eq!(spec.serialize(), spec.serialize());
        // insertion order, not alphabetic
        assert_eq!(spec.serialize(), "b,a{z,y}");
    }

    #[test]
    fn test_anime_fields_to_spec() {
        let fields = AnimeFields::builder()
            .alternative_titles(true)
            .synopsis(true)
            .my_list_status(
                AnimeListStatusFields::builder()
                    .status(true)
                    .score(true)
                    .build(),
            )
            .build();

        assert_eq!(
            fields.to_spec().serialize(),
            "alternative_titles,synopsis,my_list_status{status,score}"
        );
    }

    #[test]
    fn test_bare_my_list_status() {
        let fields = AnimeFields::builder().my_list_status(true).build();

        assert_eq!(fields.to_spec().serialize(), "my_list_status");
    }

    #[test]
    fn test_empty_sub_fields_collapse() {
        // an explicitly empty sub-field set behaves like a bare include
        let fields = MangaFields::builder()
            .my_list_status(MangaListStatusFields::default())
            .build();

        assert_eq!(fields.to_spec().serialize(), "my_list_status");
    }

    #[test]
    fn test_detailed_fields_extend_base() {
        let fields = DetailedAnimeFields::builder()
            .base(AnimeFields::builder().mean(true).build())
            .pictures(true)
            .statistics(true)
            .build();

        assert_eq!(fields.to_spec().serialize(), "mean,pictures,statistics");
    }

    #[test]
    fn test_user_list_fields() {
        let fields = UserMangaListFields::builder()
            .base(MangaFields::builder().num_chapters(true).build())
            .list_status(MangaListStatusFields::builder().score(true).build())
            .build();

        assert_eq!(
            fields.to_spec().serialize(),
            "num_chapters,list_status{score}"
        );
    }

    #[test]
    fn test_display_matches_serialize() {
        let fields = UserInfoFields::builder().name(true).picture(true).build();

        assert_eq!(fields.to_string(), "name,picture");
        assert_eq!(fields.to_string(), fields.to_spec().serialize());
    }
}
