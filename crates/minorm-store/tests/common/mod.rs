//! Shared fixtures: member and person entities with their SQLite schema

#![allow(dead_code)]

use chrono::NaiveDate;
use minorm_core::{Entity, EntityDef, EntityEnum, FieldDef};
use minorm_store::SqliteProvider;

pub const SCHEMA: &str = "
create table members (
    member_id integer primary key,
    name text not null,
    age integer,
    joined text,
    active integer not null,
    tier text not null
);
";

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
}

impl EntityEnum for Tier {
    const NAME: &'static str = "Tier";
    const MEMBERS: &'static [&'static str] = &["BRONZE", "SILVER", "GOLD"];

    fn from_member(member: &str) -> Option<Self> {
        match member {
            "BRONZE" => Some(Tier::Bronze),
            "SILVER" => Some(Tier::Silver),
            "GOLD" => Some(Tier::Gold),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub joined: NaiveDate,
    pub active: bool,
    pub tier: Tier,
}

impl Entity for Member {
    fn describe() -> EntityDef<Self> {
        EntityDef::new()
            .table("members")
            .field(FieldDef::int64("id", |m: &mut Member| &mut m.id).id().column("member_id"))
            .field(FieldDef::text("name", |m: &mut Member| &mut m.name))
            .field(FieldDef::int32("age", |m: &mut Member| &mut m.age))
            .field(FieldDef::date("joined", |m: &mut Member| &mut m.joined))
            .field(FieldDef::boolean("active", |m: &mut Member| &mut m.active))
            .field(FieldDef::enumeration("tier", |m: &mut Member| &mut m.tier))
    }
}

/// Same table, but the entity claims a column the table does not have
#[derive(Debug, Default)]
pub struct MemberWithNickname {
    pub id: i64,
    pub nickname: String,
}

impl Entity for MemberWithNickname {
    fn describe() -> EntityDef<Self> {
        EntityDef::new()
            .table("members")
            .field(FieldDef::int64("id", |m: &mut MemberWithNickname| &mut m.id).id().column("member_id"))
            .field(FieldDef::text("nickname", |m: &mut MemberWithNickname| &mut m.nickname))
    }
}

/// Entity whose text and integer fields accept NULL
#[derive(Debug, Default, PartialEq)]
pub struct Person {
    pub id: i64,
    pub nick: Option<String>,
    pub score: Option<i32>,
}

impl Entity for Person {
    fn describe() -> EntityDef<Self> {
        EntityDef::new()
            .table("people")
            .field(FieldDef::int64("id", |p: &mut Person| &mut p.id).id())
            .field(FieldDef::optional_text("nick", |p: &mut Person| &mut p.nick))
            .field(FieldDef::optional_int32("score", |p: &mut Person| &mut p.score))
    }
}

pub fn ada() -> Member {
    Member {
        id: 1,
        name: "Ada".to_string(),
        age: 36,
        joined: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
        active: true,
        tier: Tier::Gold,
    }
}

pub fn seed(provider: &SqliteProvider) {
    provider.execute_batch(SCHEMA).unwrap();
    provider
        .execute_batch(
            "insert into members values (1, 'Ada', 36, '2020-01-15', 1, 'GOLD');
             insert into members values (2, 'Grace', 45, '2019-07-01', 0, 'SILVER');
             insert into members values (3, 'Linus', null, '2021-03-03', 1, 'BRONZE');
             insert into members values (4, 'Ken', 70, 'yesterday', 1, 'BRONZE');
             insert into members values (5, 'Dennis', 70, '2018-02-02', 1, 'gold');",
        )
        .unwrap();
}

pub fn seeded_in_memory() -> SqliteProvider {
    let provider = SqliteProvider::open_in_memory().unwrap();
    seed(&provider);
    provider
}
