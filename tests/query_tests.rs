//! Legacy query tests

use card_oracle_sdk::config::OracleConfig;
use card_oracle_sdk::import::CatalogIngestor;
use card_oracle_sdk::models::{CardKind, FilterField, SearchResults, card_number_for};
use card_oracle_sdk::query::{OracleService, QueryError, QueryTranslator, ResultShaper, ServiceError};
use card_oracle_sdk::storage::InMemoryEngine;

const CATALOG: &str = r#"<cards>
    <card id="RoJ070" type="personality">
        <name>Mirumoto Hitomi</name>
        <image edition="RoJ">RoJ070.jpg</image>
        <legal>onyx</legal>
        <clan>dragon</clan>
        <text><![CDATA[<b>Unique</b> &#8226; Samurai &#8226; Duelist<br>Battle: Duel.]]></text>
        <force>4</force><chi>3</chi><personal_honor>2</personal_honor>
        <cost>8</cost><honor_req>5</honor_req>
    </card>
    <card id="KYD022" type="personality">
        <name>Goju Hitomi &#149; Experienced 3KYD</name>
        <image edition="ROU">ROU022.jpg</image>
        <legal>shattered_empire</legal>
        <clan>dragon</clan>
        <text><![CDATA[<b>Unique</b> &#8226; Ninja<br>[PAY 3]: Bow target Personality.]]></text>
        <force>3</force><chi>4</chi><personal_honor>0</personal_honor>
        <cost>9</cost><honor_req>-</honor_req>
    </card>
    <card id="Onyx010" type="personality">
        <name>Hida Kisada</name>
        <image edition="Onyx">Onyx010.jpg</image>
        <legal>onyx</legal>
        <clan>crab</clan>
        <text><![CDATA[<b>Unique</b> &#8226; Samurai<br>Battle: Destroy a Follower.]]></text>
        <force>5</force><chi>3</chi><personal_honor>2</personal_honor>
        <cost>10</cost><honor_req>6</honor_req>
    </card>
    <card id="Onyx050" type="holding">
        <name>Gold Mine</name>
        <image edition="Onyx">Onyx050.jpg</image>
        <legal>onyx</legal>
        <cost>4</cost>
    </card>
</cards>"#;

async fn seeded() -> InMemoryEngine {
    let engine = InMemoryEngine::new();
    CatalogIngestor::new(&engine, &OracleConfig::default())
        .ingest_str(CATALOG)
        .await
        .unwrap();
    engine
}

mod translator_tests {
    use super::*;

    #[test]
    fn test_translate_title_and_clan() {
        let request = QueryTranslator::new()
            .translate("field_title=Hitomi&field_clan=Dragon&size=50&from=0")
            .unwrap();

        assert_eq!(request.q, "Hitomi");
        assert_eq!(
            request.filter_values(FilterField::Clan),
            Some(&["Dragon".to_string()][..])
        );
        assert_eq!(request.limit, 50);
        assert_eq!(request.offset, 0);
        assert_eq!(request.sort.to_sort_by(), "title:asc");
        assert_eq!(request.filter_by(), "clan:=[`Dragon`]");
    }

    #[test]
    fn test_filters_combine_with_and() {
        let request = QueryTranslator::new()
            .translate("field_keywords=Samurai&field_clan=Crab&field_clan=Dragon&size=10&from=0")
            .unwrap();
        assert_eq!(
            request.filter_by(),
            "keywords:=[`Samurai`] && clan:=[`Crab`,`Dragon`]"
        );
    }
}

mod shaper_tests {
    use super::*;

    #[test]
    fn test_zero_matches_is_well_formed() {
        let envelope = ResultShaper::default().shape(SearchResults::default());
        assert_eq!(envelope.total(), 0);
        assert!(envelope.is_empty());
    }
}

mod service_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_is_sorted_by_title() {
        let engine = seeded().await;
        let service = OracleService::new(&engine, &OracleConfig::default());
        let envelope = service
            .translate_and_search("querystring=hitomi&size=50&from=0")
            .await
            .unwrap();

        let titles: Vec<&str> = envelope
            .hits
            .hits
            .iter()
            .map(|h| h.source.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Goju Hitomi", "Mirumoto Hitomi"]);
        assert_eq!(
            envelope.hits.hits[0].id,
            format!("cardid={}.0", card_number_for("KYD022"))
        );
        assert_eq!(envelope.hits.hits[0].sort, vec!["Goju Hitomi".to_string()]);
    }

    #[tokio::test]
    async fn test_filters_and_total() {
        let engine = seeded().await;
        let service = OracleService::new(&engine, &OracleConfig::default());

        let envelope = service
            .translate_and_search("field_keywords=Samurai&field_clan=Dragon&size=50&from=0")
            .await
            .unwrap();
        assert_eq!(envelope.total(), 1);
        assert_eq!(envelope.hits.hits[0].source.id, "RoJ070");
    }

    #[tokio::test]
    async fn test_repeated_clan_values_match_either() {
        let engine = seeded().await;
        let service = OracleService::new(&engine, &OracleConfig::default());
        let envelope = service
            .translate_and_search("field_clan=Crab&field_clan=Dragon&size=50&from=0")
            .await
            .unwrap();

        assert_eq!(envelope.total(), 3);
        let ids: Vec<&str> = envelope
            .hits
            .hits
            .iter()
            .map(|h| h.source.id.as_str())
            .collect();
        assert_eq!(ids, vec!["KYD022", "Onyx010", "RoJ070"]);
    }

    #[tokio::test]
    async fn test_legality_filter_with_encoded_nbsp() {
        let engine = seeded().await;
        let service = OracleService::new(&engine, &OracleConfig::default());
        let envelope = service
            .translate_and_search("field_legality=Shattered%26nbsp%3BEmpire&size=50&from=0")
            .await
            .unwrap();
        assert_eq!(envelope.total(), 1);
        assert_eq!(envelope.hits.hits[0].source.id, "KYD022");
    }

    #[tokio::test]
    async fn test_pagination_keeps_total() {
        let engine = seeded().await;
        let service = OracleService::new(&engine, &OracleConfig::default());
        let envelope = service
            .translate_and_search("size=2&from=1")
            .await
            .unwrap();

        assert_eq!(envelope.total(), 4);
        assert_eq!(envelope.hits.hits.len(), 2);
        assert_eq!(envelope.hits.hits[0].source.title, "Gold Mine");
        assert_eq!(envelope.hits.hits[1].source.title, "Hida Kisada");
    }

    #[tokio::test]
    async fn test_no_matches() {
        let engine = seeded().await;
        let service = OracleService::new(&engine, &OracleConfig::default());
        let envelope = service
            .translate_and_search("field_title=Nobody&size=10&from=0")
            .await
            .unwrap();
        assert_eq!(envelope.total(), 0);
        assert!(envelope.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_card_round_trips_kind() {
        let engine = seeded().await;
        let service = OracleService::new(&engine, &OracleConfig::default());

        let card = service.fetch_card("KYD022").await.unwrap().unwrap();
        assert_eq!(card.card_number, card_number_for("KYD022"));
        assert!(matches!(
            card.kind,
            CardKind::Personality { ref honor_requirement, .. } if honor_requirement == "-"
        ));
        assert!(service.fetch_by_id("Nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_attributes() {
        let engine = InMemoryEngine::new();
        let service = OracleService::new(&engine, &OracleConfig::default());

        let clans = service.attributes("table=l5r&lookup=clan&optgroup=1").unwrap();
        assert!(clans.as_array().unwrap().iter().any(|c| c == "Dragon"));

        let err = service.attributes("lookup=artist").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Query(QueryError::UnknownLookup(_))
        ));
    }
}

mod identity_tests {
    use super::*;
    use std::collections::HashMap;

    fn holding(id: &str, title: &str) -> String {
        format!(
            r#"<card id="{id}" type="holding">
                <name>{title}</name>
                <image edition="Onyx">{id}.jpg</image>
                <legal>onyx</legal>
                <cost>2</cost>
            </card>"#
        )
    }

    async fn hit_ids(engine: &InMemoryEngine) -> HashMap<String, String> {
        let service = OracleService::new(engine, &OracleConfig::default());
        service
            .translate_and_search("size=50&from=0")
            .await
            .unwrap()
            .hits
            .hits
            .into_iter()
            .map(|h| (h.source.id, h.id))
            .collect()
    }

    #[tokio::test]
    async fn test_ids_survive_catalog_reordering() {
        let engine = InMemoryEngine::new();
        let ingestor_config = OracleConfig::default();
        let ingestor = CatalogIngestor::new(&engine, &ingestor_config);

        let first = format!("<cards>{}</cards>", holding("Onyx001", "Farm"));
        ingestor.ingest_str(&first).await.unwrap();
        let before = hit_ids(&engine).await;

        let second = format!(
            "<cards>{}{}</cards>",
            holding("Onyx002", "Gold Mine"),
            holding("Onyx001", "Farm")
        );
        let stats = ingestor.ingest_str(&second).await.unwrap();
        assert_eq!(stats.cards_indexed, 1);
        assert_eq!(stats.already_present, 1);

        let after = hit_ids(&engine).await;
        assert_eq!(after.len(), 2);
        assert_eq!(after["Onyx001"], before["Onyx001"]);
        assert_ne!(after["Onyx001"], after["Onyx002"]);
        assert_eq!(
            after["Onyx002"],
            format!("cardid={}.0", card_number_for("Onyx002"))
        );
    }
}
