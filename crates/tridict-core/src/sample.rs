//! Built-in sample data set for development stores.
//!
//! Twenty Japanese/Chinese word pairs with levels and stroke counts, plus five
//! example sentences per language. Written through [`StoreWriter`] so the
//! result has exactly the shape of a real build.

use crate::lexicon::{
    ChineseEntry, ChineseWord, HskLevel, JapaneseDefinition, JapaneseEntry, JapaneseWord, JlptLevel,
    Language,
};
use crate::store::{StoreError, StoreWriter};

/// (english, ja headword, ja reading, zh simplified, zh traditional, pinyin, jlpt, hsk, strokes)
type SampleWord = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    JlptLevel,
    u8,
    u32,
);

const SAMPLE_WORDS: &[SampleWord] = &[
    ("cat", "猫", "ねこ", "猫", "貓", "māo", JlptLevel::N3, 1, 11),
    ("dog", "犬", "いぬ", "狗", "狗", "gǒu", JlptLevel::N3, 2, 8),
    ("eat", "食べる", "たべる", "吃", "吃", "chī", JlptLevel::N4, 1, 6),
    ("drink", "飲む", "のむ", "喝", "喝", "hē", JlptLevel::N4, 1, 12),
    ("book", "本", "ほん", "书", "書", "shū", JlptLevel::N5, 1, 4),
    ("water", "水", "みず", "水", "水", "shuǐ", JlptLevel::N5, 1, 4),
    ("fire", "火", "ひ", "火", "火", "huǒ", JlptLevel::N5, 1, 4),
    ("tree", "木", "き", "树", "樹", "shù", JlptLevel::N5, 1, 4),
    ("person", "人", "ひと", "人", "人", "rén", JlptLevel::N5, 1, 2),
    ("big", "大きい", "おおきい", "大", "大", "dà", JlptLevel::N5, 1, 3),
    ("small", "小さい", "ちいさい", "小", "小", "xiǎo", JlptLevel::N5, 1, 3),
    ("good", "良い", "よい", "好", "好", "hǎo", JlptLevel::N4, 1, 6),
    ("bad", "悪い", "わるい", "坏", "壞", "huài", JlptLevel::N4, 2, 7),
    ("house", "家", "いえ", "家", "家", "jiā", JlptLevel::N5, 1, 10),
    ("school", "学校", "がっこう", "学校", "學校", "xuéxiào", JlptLevel::N5, 1, 10),
    ("friend", "友達", "ともだち", "朋友", "朋友", "péngyǒu", JlptLevel::N4, 1, 8),
    ("time", "時間", "じかん", "时间", "時間", "shíjiān", JlptLevel::N4, 1, 10),
    ("year", "年", "とし", "年", "年", "nián", JlptLevel::N5, 1, 6),
    ("day", "日", "ひ", "天", "天", "tiān", JlptLevel::N5, 1, 4),
    ("hand", "手", "て", "手", "手", "shǒu", JlptLevel::N5, 1, 4),
];

/// (index into `SAMPLE_WORDS`, sentence, english)
const JAPANESE_EXAMPLES: &[(usize, &str, &str)] = &[
    (0, "猫が好きです。", "I like cats."),
    (1, "犬を飼っています。", "I have a dog."),
    (2, "ご飯を食べます。", "I eat rice."),
    (3, "水を飲みます。", "I drink water."),
    (4, "本を読みます。", "I read books."),
];

const CHINESE_EXAMPLES: &[(usize, &str, &str)] = &[
    (0, "我喜欢猫。", "I like cats."),
    (1, "我有一只狗。", "I have a dog."),
    (2, "我吃饭。", "I eat rice."),
    (3, "我喝水。", "I drink water."),
    (4, "我看书。", "I read books."),
];

/// Number of built-in Japanese/Chinese word pairs.
pub fn word_pair_count() -> usize {
    SAMPLE_WORDS.len()
}

fn entries(rank: u32, word: &SampleWord) -> (JapaneseEntry, ChineseEntry) {
    let &(english, ja_head, ja_read, zh_simp, zh_trad, pinyin, jlpt, hsk, strokes) = word;
    let ja = JapaneseEntry {
        word: JapaneseWord {
            headword: ja_head.to_string(),
            reading: ja_read.to_string(),
            is_common: true,
            frequency_rank: Some(rank),
            jlpt_level: Some(jlpt),
            stroke_count: Some(strokes),
        },
        definitions: vec![JapaneseDefinition {
            gloss: english.to_string(),
            pos: Some("noun".to_string()),
        }],
    };
    let zh = ChineseEntry {
        word: ChineseWord {
            simplified: zh_simp.to_string(),
            traditional: zh_trad.to_string(),
            pinyin: pinyin.to_string(),
            is_common: true,
            frequency_rank: Some(rank),
            hsk_level: HskLevel::new(hsk),
            stroke_count: strokes,
        },
        definitions: vec![english.to_string()],
    };
    (ja, zh)
}

/// Write the sample word pairs and examples. Frequency rank is the 1-based
/// position in the word list.
pub fn write_sample(writer: &mut StoreWriter) -> Result<(), StoreError> {
    let mut ja_ids = Vec::with_capacity(SAMPLE_WORDS.len());
    let mut zh_ids = Vec::with_capacity(SAMPLE_WORDS.len());
    for (rank, word) in (1..).zip(SAMPLE_WORDS) {
        let (ja, zh) = entries(rank, word);
        ja_ids.push(writer.write_japanese_entry(&ja)?);
        zh_ids.push(writer.write_chinese_entry(&zh)?);
    }

    for &(i, sentence, english) in JAPANESE_EXAMPLES {
        writer.insert_example(Language::Japanese, ja_ids[i], sentence, english)?;
    }
    for &(i, sentence, english) in CHINESE_EXAMPLES {
        writer.insert_example(Language::Chinese, zh_ids[i], sentence, english)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{count_rows, open, read_chinese_word, read_japanese_word, DEFAULT_SCHEMA};

    #[test]
    fn test_sample_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.sqlite");
        let mut writer = StoreWriter::create(&path, DEFAULT_SCHEMA, 7).unwrap();
        write_sample(&mut writer).unwrap();
        let stats = writer.finalize().unwrap();
        assert_eq!(stats.japanese_words, 20);
        assert_eq!(stats.examples, 10);

        let conn = open(&path).unwrap();
        let counts = count_rows(&conn).unwrap();
        assert_eq!(counts.japanese_words, 20);
        assert_eq!(counts.chinese_definitions, 20);
        assert_eq!(counts.examples, 10);

        let neko = read_japanese_word(&conn, 1).unwrap();
        assert_eq!(neko.headword, "猫");
        assert_eq!(neko.jlpt_level, Some(JlptLevel::N3));
        assert_eq!(neko.frequency_rank, Some(1));

        let mao = read_chinese_word(&conn, 1).unwrap();
        assert_eq!(mao.traditional, "貓");
        assert_eq!(mao.hsk_level.map(HskLevel::number), Some(1));
        assert_eq!(mao.stroke_count, 11);
    }

    #[test]
    fn test_examples_point_at_their_words() {
        assert!(JAPANESE_EXAMPLES
            .iter()
            .all(|&(i, ..)| i < SAMPLE_WORDS.len()));
        for &(i, sentence, _) in CHINESE_EXAMPLES {
            let (.., simplified, _, _, _, _, _) = SAMPLE_WORDS[i];
            assert!(sentence.contains(simplified), "{sentence} / {simplified}");
        }
        assert_eq!(word_pair_count(), 20);
    }
}
