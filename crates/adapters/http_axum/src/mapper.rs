//! Hand-written conversions between wire DTOs and domain types.

use std::str::FromStr;

use refhub_domain::error::{RefHubError, ValidationError};
use refhub_domain::id::RegionId;
use refhub_domain::language::Iso3Language;
use refhub_domain::page::{Direction, Order, Page, Pageable};
use refhub_domain::region::{Region, RegionTranslation};

use crate::dto::{OrderDto, PageDto, PageableDto, RegionDto, RegionTrlDto};

/// Parse an optional language code; blank means "no language".
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLanguage`] for anything that is not a
/// three-letter code.
pub fn to_language(code: Option<&str>) -> Result<Option<Iso3Language>, RefHubError> {
    match code.map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => Ok(Some(Iso3Language::from_str(code)?)),
    }
}

/// Parse a required region id.
///
/// # Errors
///
/// Returns [`ValidationError::MissingId`] when absent or blank and
/// [`ValidationError::InvalidId`] when not a UUID.
pub fn to_region_id(id: Option<&str>) -> Result<RegionId, RefHubError> {
    let id = id.map(str::trim).filter(|s| !s.is_empty());
    let Some(id) = id else {
        return Err(ValidationError::MissingId.into());
    };
    RegionId::from_str(id).map_err(|_| ValidationError::InvalidId(id.to_string()).into())
}

/// Convert the wire pageable into a domain [`Pageable`]; `None` yields the
/// default first page.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPageSize`] for a zero size and
/// [`ValidationError::InvalidSortDirection`] for an unknown direction.
pub fn to_pageable(dto: Option<PageableDto>) -> Result<Pageable, RefHubError> {
    let Some(dto) = dto else {
        return Ok(Pageable::default());
    };
    let sort = dto
        .sort
        .into_iter()
        .map(to_order)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Pageable::new(dto.page, dto.size, sort)?)
}

fn to_order(dto: OrderDto) -> Result<Order, ValidationError> {
    let direction = match dto.direction.as_deref() {
        None => Direction::Asc,
        Some(raw) => Direction::from_str(raw)?,
    };
    Ok(Order {
        property: dto.property,
        direction,
    })
}

/// Convert an incoming region DTO into a validated domain [`Region`].
///
/// A missing id produces a fresh one (the service then creates the region).
///
/// # Errors
///
/// Returns a validation error for a malformed id or language code, or when
/// the resulting region violates a domain invariant.
pub fn to_region(dto: RegionDto) -> Result<Region, RefHubError> {
    let translations = dto
        .translations
        .into_iter()
        .map(to_translation)
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = Region::builder()
        .name(dto.name)
        .translations(translations)
        .is_active(dto.is_active);
    if dto.id.as_deref().is_some_and(|id| !id.trim().is_empty()) {
        builder = builder.id(to_region_id(dto.id.as_deref())?);
    }
    if let Some(created) = dto.created {
        builder = builder.created(created);
    }
    if let Some(modified) = dto.modified {
        builder = builder.modified(modified);
    }
    builder.build()
}

fn to_translation(dto: RegionTrlDto) -> Result<RegionTranslation, RefHubError> {
    Ok(RegionTranslation {
        iso3_language: Iso3Language::from_str(&dto.iso3_language)?,
        name: dto.name,
        is_default: dto.is_default,
    })
}

/// Convert a domain region into its wire form, resolving `displayName` for
/// `language`.
#[must_use]
pub fn to_region_dto(region: Region, language: Option<&Iso3Language>) -> RegionDto {
    let display_name = region.name_in(language).to_string();
    RegionDto {
        id: Some(region.id.to_string()),
        name: region.name,
        translations: region
            .translations
            .into_iter()
            .map(|trl| RegionTrlDto {
                iso3_language: trl.iso3_language.into(),
                name: trl.name,
                is_default: trl.is_default,
            })
            .collect(),
        is_active: region.is_active,
        created: Some(region.created),
        modified: Some(region.modified),
        display_name: Some(display_name),
    }
}

/// Convert a page of regions into a page of DTOs.
#[must_use]
pub fn to_page_dto(page: Page<Region>, language: Option<&Iso3Language>) -> PageDto<RegionDto> {
    let total_pages = page.total_pages();
    let page = page.map(|region| to_region_dto(region, language));
    PageDto {
        content: page.content,
        number: page.number,
        size: page.size,
        total_elements: page.total_elements,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str) -> RegionDto {
        RegionDto {
            id: None,
            name: name.to_string(),
            translations: vec![
                RegionTrlDto {
                    iso3_language: "ENG".to_string(),
                    name: "Northern Africa".to_string(),
                    is_default: true,
                },
                RegionTrlDto {
                    iso3_language: "fra".to_string(),
                    name: "Afrique du Nord".to_string(),
                    is_default: false,
                },
            ],
            is_active: true,
            created: None,
            modified: None,
            display_name: None,
        }
    }

    #[test]
    fn should_generate_id_when_dto_has_none() {
        let region = to_region(dto("Northern Africa")).unwrap();
        assert_eq!(region.name, "Northern Africa");
        assert_eq!(region.translations[0].iso3_language.as_str(), "eng");
    }

    #[test]
    fn should_keep_id_when_dto_has_one() {
        let id = RegionId::new();
        let mut input = dto("Northern Africa");
        input.id = Some(id.to_string());

        assert_eq!(to_region(input).unwrap().id, id);
    }

    #[test]
    fn should_reject_malformed_id() {
        let mut input = dto("Northern Africa");
        input.id = Some("region-1".to_string());

        let result = to_region(input);
        assert!(matches!(
            result,
            Err(RefHubError::Validation(ValidationError::InvalidId(id))) if id == "region-1"
        ));
    }

    #[test]
    fn should_reject_malformed_translation_language() {
        let mut input = dto("Northern Africa");
        input.translations[1].iso3_language = "fr".to_string();

        let result = to_region(input);
        assert!(matches!(
            result,
            Err(RefHubError::Validation(ValidationError::InvalidLanguage(_)))
        ));
    }

    #[test]
    fn should_resolve_display_name_for_language() {
        let region = to_region(dto("Northern Africa")).unwrap();
        let fra = Iso3Language::from_str("fra").unwrap();

        let out = to_region_dto(region.clone(), Some(&fra));
        assert_eq!(out.display_name.as_deref(), Some("Afrique du Nord"));
        assert_eq!(out.id, Some(region.id.to_string()));
        assert_eq!(out.translations[0].iso3_language, "eng");
    }

    #[test]
    fn should_map_dto_back_to_same_region() {
        let region = to_region(dto("Northern Africa")).unwrap();
        let back = to_region(to_region_dto(region.clone(), None)).unwrap();
        assert_eq!(back, region);
    }

    #[test]
    fn should_require_region_id() {
        assert!(matches!(
            to_region_id(Some("  ")),
            Err(RefHubError::Validation(ValidationError::MissingId))
        ));
        assert!(matches!(
            to_region_id(None),
            Err(RefHubError::Validation(ValidationError::MissingId))
        ));
    }

    #[test]
    fn should_treat_blank_language_as_none() {
        assert_eq!(to_language(Some(" ")).unwrap(), None);
        assert!(to_language(Some("english")).is_err());
    }

    #[test]
    fn should_default_pageable_when_absent() {
        assert_eq!(to_pageable(None).unwrap(), Pageable::default());
    }

    #[test]
    fn should_reject_unknown_direction() {
        let pageable = PageableDto {
            page: 0,
            size: 10,
            sort: vec![OrderDto {
                property: "name".to_string(),
                direction: Some("upward".to_string()),
            }],
        };
        assert!(matches!(
            to_pageable(Some(pageable)),
            Err(RefHubError::Validation(ValidationError::InvalidSortDirection(_)))
        ));
    }

    #[test]
    fn should_carry_page_metadata_into_dto() {
        let pageable = Pageable::new(1, 2, vec![]).unwrap();
        let region = to_region(dto("Northern Africa")).unwrap();
        let page = Page::new(vec![region], &pageable, 3);

        let out = to_page_dto(page, None);
        assert_eq!(out.number, 1);
        assert_eq!(out.size, 2);
        assert_eq!(out.total_elements, 3);
        assert_eq!(out.total_pages, 2);
        assert_eq!(out.content.len(), 1);
    }
}
