//! Benchmarks for bookTicker decoding
//!
//! Decode cost includes the symbol lookup, so each decoder is measured with
//! the perfect hash and with the dynamic map.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hft_symbols::artifacts::PerfectHashSource;
use hft_symbols::core::{normalize, DynamicSymbolMap, SymbolRecord, TradingStatus};
use hft_symbols::parsing::{MessageDecoder, ScanDecoder, SimdJsonDecoder};
use hft_symbols::{DisplacementCompiler, HashTableCompiler, SymbolTable};

// Real exchange message formats
const SPOT_BOOK_TICKER: &[u8] = br#"{"u":400900217,"s":"BNBUSDT","b":"25.35190000","B":"31.21000000","a":"25.36520000","A":"40.66000000"}"#;

const FUTURES_BOOK_TICKER: &[u8] = br#"{"e":"bookTicker","u":400900217,"E":1568014460893,"T":1568014460891,"s":"BTCUSDT","b":"64000.10","B":"1.5","a":"64000.20","A":"2.0"}"#;

fn symbol_table() -> SymbolTable {
    let records: Vec<SymbolRecord> = ["BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "ETHBTC"]
        .iter()
        .map(|s| SymbolRecord::new(*s, TradingStatus::Trading))
        .collect();
    SymbolTable::assign(normalize(&records).expect("well formed"))
}

fn bench_decode<D: MessageDecoder>(c: &mut Criterion, group_name: &str, name: &str, decoder: &mut D) {
    let mut group = c.benchmark_group(group_name);
    for (kind, msg) in [("spot", SPOT_BOOK_TICKER), ("futures", FUTURES_BOOK_TICKER)] {
        group.throughput(Throughput::Bytes(msg.len() as u64));
        group.bench_function(format!("{}/{}", name, kind), |b| {
            b.iter(|| black_box(decoder.decode(black_box(msg))))
        });
    }
    group.finish();
}

fn bench_book_ticker(c: &mut Criterion) {
    let table = symbol_table();
    let perfect_hash = DisplacementCompiler::default()
        .compile(&PerfectHashSource::from_table(&table))
        .expect("table compiles");
    let dynamic = DynamicSymbolMap::from_table(&table);

    bench_decode(c, "book_ticker_scan", "perfect_hash", &mut ScanDecoder::new(&perfect_hash));
    bench_decode(c, "book_ticker_scan", "std_hashmap", &mut ScanDecoder::new(&dynamic));
    bench_decode(c, "book_ticker_simd", "perfect_hash", &mut SimdJsonDecoder::new(&perfect_hash));
    bench_decode(c, "book_ticker_simd", "std_hashmap", &mut SimdJsonDecoder::new(&dynamic));
}

criterion_group!(benches, bench_book_ticker);
criterion_main!(benches);
