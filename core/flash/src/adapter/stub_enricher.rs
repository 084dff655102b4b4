//! テスト用: 単語ごとに固定の結果を返す Enricher 実装


#[cfg(test)]
pub use stub::StubEnricher;
