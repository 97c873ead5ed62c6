//! Schema-directed value generation.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use datashape_core::schema::{CustomSchema, Item, ListProps, StrProps};
use datashape_core::{CapabilityError, Schema, Value};
use tracing::trace;
use uuid::Builder;

use crate::consts::{
    BYTES_LEN_MAX, BYTES_LEN_MIN, DATE_DAYS_SPAN, FLOAT_MAX, FLOAT_MIN, INT_MAX, INT_MIN,
    LIST_LEN_MAX, LIST_LEN_MIN, MAX_ATTEMPTS, STR_ALPHABET, STR_LEN_MAX, STR_LEN_MIN,
};
use crate::errors::GenerationError;
use crate::random::RandomSource;
use crate::regex::RegexGenerator;

/// Generation hook for a custom schema variant.
pub trait GenerateHook: Send + Sync {
    fn generate(
        &self,
        schema: &CustomSchema,
        random: &mut RandomSource,
    ) -> Result<Value, GenerationError>;
}

/// Walks a schema and produces a value admitted by it.
///
/// All randomness comes from the owned [`RandomSource`], so a seeded
/// generator replays the same values for the same schema.
pub struct Generator {
    random: RandomSource,
    hooks: HashMap<String, Box<dyn GenerateHook>>,
}

impl Generator {
    pub fn new(random: RandomSource) -> Self {
        Self {
            random,
            hooks: HashMap::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(RandomSource::from_seed(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(RandomSource::from_entropy())
    }

    /// Register the generation hook for a custom type name. The last
    /// registration for a name wins.
    pub fn register_hook(&mut self, type_name: impl Into<String>, hook: Box<dyn GenerateHook>) {
        self.hooks.insert(type_name.into(), hook);
    }

    pub fn generate(&mut self, schema: &Schema) -> Result<Value, GenerationError> {
        trace!(kind = schema.kind(), "generate");
        match schema {
            Schema::None => Ok(Value::Null),
            Schema::Bool(props) => Ok(Value::Bool(match props.value {
                Some(value) => value,
                None => self.random.bool(),
            })),
            Schema::Int(props) | Schema::Int32(props) => Ok(Value::Int(self.generate_int(
                props.value,
                props.min,
                props.max,
                props.multiple_of,
            ))),
            Schema::Float(props) => {
                if let Some(value) = props.value {
                    return Ok(Value::Float(value));
                }
                let min = props.min.unwrap_or(FLOAT_MIN);
                let max = props.max.unwrap_or(FLOAT_MAX);
                Ok(Value::Float(match props.precision {
                    Some(precision) => self.random.float_with_precision(min, max, precision),
                    None => self.random.float_in(min, max),
                }))
            }
            Schema::Str(props) => self.generate_str(props),
            Schema::Bytes(props) => {
                if let Some(value) = &props.value {
                    return Ok(Value::Bytes(value.clone()));
                }
                let len = self.random.usize_in(BYTES_LEN_MIN, BYTES_LEN_MAX);
                Ok(Value::Bytes(self.random.string(len, STR_ALPHABET).into_bytes()))
            }
            Schema::List(props) => self.generate_list(props),
            Schema::Dict(props) => {
                let mut generated = indexmap::IndexMap::new();
                if let Some(keys) = &props.keys {
                    for (name, entry) in keys {
                        if entry.optional {
                            continue;
                        }
                        generated.insert(name.clone(), self.generate(&entry.schema)?);
                    }
                }
                Ok(Value::Dict(generated))
            }
            Schema::Any(props) => match &props.types {
                None => Ok(Value::Null),
                Some(types) => {
                    let chosen = self.random.index(types.len());
                    self.generate(&types[chosen])
                }
            },
            Schema::Uuid4(props) => {
                if let Some(value) = props.value {
                    return Ok(Value::Uuid(value));
                }
                let mut bytes = [0u8; 16];
                self.random.fill_bytes(&mut bytes);
                Ok(Value::Uuid(Builder::from_random_bytes(bytes).into_uuid()))
            }
            Schema::Date(props) => {
                if let Some(value) = props.value {
                    return Ok(Value::Date(value));
                }
                let days = self.random.int_in(-DATE_DAYS_SPAN, DATE_DAYS_SPAN);
                Ok(Value::Date(Utc::now().date_naive() + Duration::days(days)))
            }
            Schema::DateTime(props) => Ok(Value::DateTime(match props.value {
                Some(value) => value,
                None => Utc::now().naive_utc(),
            })),
            Schema::Alias(props) => self.generate(&props.inner),
            Schema::Custom(custom) => {
                let hook = self
                    .hooks
                    .get(custom.name())
                    .ok_or_else(|| CapabilityError::new(custom.name(), "generate"))?;
                hook.generate(custom, &mut self.random)
            }
        }
    }

    fn generate_int(
        &mut self,
        value: Option<i64>,
        min: Option<i64>,
        max: Option<i64>,
        multiple_of: Option<i64>,
    ) -> i64 {
        if let Some(value) = value {
            return value;
        }
        let min = min.unwrap_or(INT_MIN);
        let max = max.unwrap_or(INT_MAX);
        if let Some(step) = multiple_of {
            let lo = (min as i128).div_euclid(step as i128)
                + i128::from((min as i128).rem_euclid(step as i128) != 0);
            let hi = (max as i128).div_euclid(step as i128);
            let k = self.random.i128_in(lo, hi.max(lo));
            return (k * step as i128) as i64;
        }
        self.random.int_in(min, max)
    }

    fn generate_str(&mut self, props: &StrProps) -> Result<Value, GenerationError> {
        if let Some(value) = &props.value {
            return Ok(Value::Str(value.clone()));
        }
        if let Some(pattern) = &props.pattern {
            let generator = RegexGenerator::new(pattern)?;
            return Ok(Value::Str(generator.generate(&mut self.random)?));
        }

        let length = match props.len {
            Some(len) => len,
            None => {
                let mut min_len = props.min_len.unwrap_or(STR_LEN_MIN);
                let mut max_len = props.max_len.unwrap_or(STR_LEN_MAX);
                if let Some(substr) = &props.substr {
                    let substr_len = substr.chars().count();
                    min_len = min_len.max(substr_len);
                    max_len = max_len.max(substr_len);
                }
                self.random.usize_in(min_len, max_len)
            }
        };
        let alphabet = props.alphabet.as_deref().unwrap_or(STR_ALPHABET);

        if let Some(substr) = &props.substr {
            let substr_len = substr.chars().count();
            let padding = self.random.string(length.saturating_sub(substr_len), alphabet);
            let chars: Vec<char> = padding.chars().collect();
            let offset = self.random.usize_in(0, chars.len());
            let mut spliced: String = chars[..offset].iter().collect();
            spliced.push_str(substr);
            spliced.extend(&chars[offset..]);
            return Ok(Value::Str(spliced));
        }

        Ok(Value::Str(self.random.string(length, alphabet)))
    }

    fn generate_list(&mut self, props: &ListProps) -> Result<Value, GenerationError> {
        if let Some(items) = &props.elements {
            let concrete: Vec<&Schema> = items.iter().filter_map(Item::as_schema).collect();
            let mut elements = Vec::new();
            for (slot, element) in concrete.iter().enumerate() {
                match self.push_element(&mut elements, element, props.unique) {
                    Ok(()) => {}
                    Err(GenerationError::RetryBudgetExceeded { attempts }) => {
                        // A slot repeating an earlier slot's schema proves the
                        // shared value space is too small; otherwise the
                        // search may just have been unlucky.
                        if concrete[..slot].iter().any(|earlier| *earlier == *element) {
                            return Err(GenerationError::ValueSpaceExhausted {
                                schema: element.kind(),
                                required: concrete.len(),
                            });
                        }
                        return Err(GenerationError::RetryBudgetExceeded { attempts });
                    }
                    Err(err) => return Err(err),
                }
            }
            return Ok(Value::List(elements));
        }

        let length = match props.len {
            Some(len) => len,
            None => {
                let min_len = props.min_len.unwrap_or(LIST_LEN_MIN);
                let max_len = props.max_len.unwrap_or(LIST_LEN_MAX);
                self.random.usize_in(min_len, max_len)
            }
        };

        if let Some(element) = &props.of {
            let mut elements = Vec::with_capacity(length);
            for _ in 0..length {
                self.push_homogeneous(&mut elements, element, props.unique, length)?;
            }
            return Ok(Value::List(elements));
        }

        // No element type: a declared length yields empty-list placeholders.
        let length_specified =
            props.len.is_some() || props.min_len.is_some() || props.max_len.is_some();
        if length_specified {
            return Ok(Value::List(vec![Value::List(Vec::new()); length]));
        }
        Ok(Value::List(Vec::new()))
    }

    fn push_homogeneous(
        &mut self,
        elements: &mut Vec<Value>,
        element: &Schema,
        unique: bool,
        required: usize,
    ) -> Result<(), GenerationError> {
        if !unique {
            elements.push(self.generate(element)?);
            return Ok(());
        }
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.generate(element)?;
            if !elements.contains(&candidate) {
                elements.push(candidate);
                return Ok(());
            }
        }
        // Every element shares one schema, so a failed search means the
        // value space itself is too small.
        Err(GenerationError::ValueSpaceExhausted {
            schema: element.kind(),
            required,
        })
    }

    fn push_element(
        &mut self,
        elements: &mut Vec<Value>,
        element: &Schema,
        unique: bool,
    ) -> Result<(), GenerationError> {
        if !unique {
            elements.push(self.generate(element)?);
            return Ok(());
        }
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.generate(element)?;
            if !elements.contains(&candidate) {
                elements.push(candidate);
                return Ok(());
            }
        }
        Err(GenerationError::RetryBudgetExceeded {
            attempts: MAX_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use datashape_core::schema::{self, ellipsis, item, optional};

    use super::*;

    fn generate(schema: impl Into<Schema>, seed: u64) -> Value {
        Generator::with_seed(seed).generate(&schema.into()).unwrap()
    }

    #[test]
    fn fixed_values_short_circuit() {
        assert_eq!(generate(schema::int().value(42).unwrap(), 0), Value::Int(42));
        assert_eq!(
            generate(schema::str().value("hi").unwrap(), 0),
            Value::Str("hi".to_string())
        );
        assert_eq!(generate(schema::none(), 0), Value::Null);
    }

    #[test]
    fn int_ranges_are_honored() {
        let sch: Schema = schema::int().min(10).unwrap().max(20).unwrap().into();
        let mut generator = Generator::with_seed(5);
        for _ in 0..50 {
            let Value::Int(x) = generator.generate(&sch).unwrap() else {
                panic!("expected an int");
            };
            assert!((10..=20).contains(&x));
        }
    }

    #[test]
    fn multiples_are_generated_in_range() {
        let sch: Schema = schema::int()
            .min(1)
            .unwrap()
            .max(100)
            .unwrap()
            .multiple_of(7)
            .unwrap()
            .into();
        let mut generator = Generator::with_seed(9);
        for _ in 0..50 {
            let Value::Int(x) = generator.generate(&sch).unwrap() else {
                panic!("expected an int");
            };
            assert_eq!(x % 7, 0);
            assert!((1..=100).contains(&x));
        }
    }

    #[test]
    fn str_length_alphabet_and_substr() {
        let sch: Schema = schema::str()
            .len(12)
            .unwrap()
            .alphabet("ab")
            .unwrap()
            .into();
        let Value::Str(s) = generate(sch, 3) else {
            panic!("expected a string");
        };
        assert_eq!(s.chars().count(), 12);
        assert!(s.chars().all(|c| c == 'a' || c == 'b'));

        let sch: Schema = schema::str().contains("banana").unwrap().into();
        let Value::Str(s) = generate(sch, 3) else {
            panic!("expected a string");
        };
        assert!(s.contains("banana"));
    }

    #[test]
    fn list_templates_skip_rest_markers() {
        let sch: Schema = schema::list()
            .elements(vec![ellipsis(), item(schema::int().value(1).unwrap()), ellipsis()])
            .unwrap()
            .into();
        assert_eq!(generate(sch, 0), Value::List(vec![Value::Int(1)]));
    }

    #[test]
    fn untyped_list_with_length_yields_placeholders() {
        let sch: Schema = schema::list().len(3).unwrap().into();
        assert_eq!(
            generate(sch, 0),
            Value::List(vec![Value::List(Vec::new()); 3])
        );
        let bare: Schema = schema::list().into();
        assert_eq!(generate(bare, 0), Value::List(Vec::new()));
    }

    #[test]
    fn unique_list_of_bools_longer_than_two_is_exhausted() {
        let sch: Schema = schema::list()
            .of(schema::bool())
            .unwrap()
            .len(3)
            .unwrap()
            .unique()
            .unwrap()
            .into();
        let err = Generator::with_seed(0).generate(&sch).unwrap_err();
        assert!(matches!(err, GenerationError::ValueSpaceExhausted { .. }));
    }

    #[test]
    fn unique_list_within_the_value_space_succeeds() {
        let sch: Schema = schema::list()
            .of(schema::int().min(0).unwrap().max(1000).unwrap())
            .unwrap()
            .len(10)
            .unwrap()
            .unique()
            .unwrap()
            .into();
        let Value::List(elements) = generate(sch, 11) else {
            panic!("expected a list");
        };
        assert_eq!(elements.len(), 10);
        for (i, a) in elements.iter().enumerate() {
            assert!(!elements[..i].contains(a));
        }
    }

    #[test]
    fn dict_generation_skips_optional_keys() {
        let sch: Schema = schema::dict()
            .keys(vec![
                ("id".into(), schema::int().value(1).unwrap().into()),
                (optional("note"), schema::str().into()),
            ])
            .unwrap()
            .into();
        let Value::Dict(entries) = generate(sch, 0) else {
            panic!("expected a dict");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["id"], Value::Int(1));
    }

    #[test]
    fn union_picks_one_alternative() {
        let sch: Schema = schema::any()
            .alternatives(vec![
                schema::int().value(1).unwrap().into(),
                schema::str().value("x").unwrap().into(),
            ])
            .unwrap()
            .into();
        let mut generator = Generator::with_seed(2);
        for _ in 0..20 {
            let value = generator.generate(&sch).unwrap();
            assert!(value == Value::Int(1) || value == Value::Str("x".to_string()));
        }
    }

    #[test]
    fn same_seed_generates_the_same_value() {
        let sch: Schema = schema::dict()
            .keys(vec![
                ("id".into(), schema::int().into()),
                ("name".into(), schema::str().min_len(4).unwrap().into()),
                ("tags".into(), schema::list().of(schema::str()).unwrap().into()),
            ])
            .unwrap()
            .into();
        assert_eq!(generate(sch.clone(), 1234), generate(sch, 1234));
    }

    #[test]
    fn custom_variants_need_a_hook() {
        let custom = CustomSchema::new("Port").unwrap();
        let sch: Schema = custom.clone().into();
        let err = Generator::with_seed(0).generate(&sch).unwrap_err();
        assert!(matches!(err, GenerationError::Capability(_)));

        struct PortHook;
        impl GenerateHook for PortHook {
            fn generate(
                &self,
                _schema: &CustomSchema,
                random: &mut RandomSource,
            ) -> Result<Value, GenerationError> {
                Ok(Value::Int(random.int_in(1, 65535)))
            }
        }

        let mut generator = Generator::with_seed(0);
        generator.register_hook("Port", Box::new(PortHook));
        let Value::Int(port) = generator.generate(&custom.into()).unwrap() else {
            panic!("expected an int");
        };
        assert!((1..=65535).contains(&port));
    }
}
