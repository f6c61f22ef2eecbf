//! Speaker and recording attribute codes.
//!
//! Fixed small-enum attributes describing a speaker or a recording's
//! provenance and quality. They exist only for filtering; unknown code
//! values in the metadata are a configuration-class error.

use std::collections::HashSet;

use kospeech_common::{Error, Result};

/// Speaker sex code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SexCode {
    Male,
    Female,
}

impl SexCode {
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim() {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            other => Err(Error::UnknownCode(format!("sex {other:?}"))),
        }
    }
}

/// Speaker age band code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeCode {
    Child,
    Teenager,
    Adult,
    Senior,
    Etc,
}

impl AgeCode {
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim() {
            "C" => Ok(Self::Child),
            "T" => Ok(Self::Teenager),
            "A" => Ok(Self::Adult),
            "S" => Ok(Self::Senior),
            "Z" => Ok(Self::Etc),
            other => Err(Error::UnknownCode(format!("age {other:?}"))),
        }
    }
}

/// Speaker dialect region code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectCode {
    Seoul,
    Kangwon,
    Choongchun,
    Kyeongsang,
    Jeonla,
    Jeju,
    Etc,
}

impl DialectCode {
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim() {
            "1" => Ok(Self::Seoul),
            "2" => Ok(Self::Kangwon),
            "3" => Ok(Self::Choongchun),
            "4" => Ok(Self::Kyeongsang),
            "5" => Ok(Self::Jeonla),
            "6" => Ok(Self::Jeju),
            "9" => Ok(Self::Etc),
            other => Err(Error::UnknownCode(format!("dialect {other:?}"))),
        }
    }
}

/// Recording provenance code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceCode {
    Broadcast,
    Made,
    Crowdsource,
    Etc,
}

impl ReferenceCode {
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim() {
            "1" => Ok(Self::Broadcast),
            "2" => Ok(Self::Made),
            "3" => Ok(Self::Crowdsource),
            "9" => Ok(Self::Etc),
            other => Err(Error::UnknownCode(format!("reference {other:?}"))),
        }
    }
}

/// Recording quality code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityCode {
    Good,
    Noise,
    Bad,
    Remote,
}

impl QualityCode {
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim() {
            "1" => Ok(Self::Good),
            "2" => Ok(Self::Noise),
            "3" => Ok(Self::Bad),
            "4" => Ok(Self::Remote),
            other => Err(Error::UnknownCode(format!("quality {other:?}"))),
        }
    }
}

/// The five attribute codes of one metadata record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub sex: SexCode,
    pub age: AgeCode,
    pub dialect: DialectCode,
    pub reference: ReferenceCode,
    pub quality: QualityCode,
}

impl Attributes {
    /// Parse the raw code fields of a metadata line
    pub fn parse(
        sex: &str,
        age: &str,
        dialect: &str,
        reference: &str,
        quality: &str,
    ) -> Result<Self> {
        Ok(Self {
            sex: SexCode::parse(sex)?,
            age: AgeCode::parse(age)?,
            dialect: DialectCode::parse(dialect)?,
            reference: ReferenceCode::parse(reference)?,
            quality: QualityCode::parse(quality)?,
        })
    }
}

/// Per-attribute exclusion sets.
///
/// A record whose value is a member of the configured set is dropped; an
/// empty set leaves the attribute unconstrained.
#[derive(Debug, Clone, Default)]
pub struct AttributeFilter {
    pub sex: HashSet<SexCode>,
    pub age: HashSet<AgeCode>,
    pub dialect: HashSet<DialectCode>,
    pub reference: HashSet<ReferenceCode>,
    pub quality: HashSet<QualityCode>,
}

impl AttributeFilter {
    pub fn excludes(&self, attrs: &Attributes) -> bool {
        self.sex.contains(&attrs.sex)
            || self.age.contains(&attrs.age)
            || self.dialect.contains(&attrs.dialect)
            || self.reference.contains(&attrs.reference)
            || self.quality.contains(&attrs.quality)
    }
}
