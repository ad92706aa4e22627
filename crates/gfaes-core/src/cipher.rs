//! Key schedule and the forward/inverse round pipelines.

use crate::block::{xor_block, Block, BLOCK_SIZE};
use crate::error::Result;
use crate::field::multiply;
use crate::key::RoundKeys;
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::tables;
use crate::state::StateArray;

/// Expands `key` into `iterations + 1` round keys.
///
/// Each round takes the last column of the previous key, rotates it one byte,
/// substitutes it through the S-box and folds in the round constant; that word
/// is then XOR-chained across the previous key's columns.
pub fn expand_key(key: &[u8], iterations: usize) -> Result<RoundKeys> {
    let tables = tables()?;
    let seed = StateArray::from_bytes(key)?;
    let dimens = seed.dimens();

    let mut keys = Vec::with_capacity(iterations + 1);
    keys.push(seed);

    let mut round_constant = vec![0u8; dimens];
    round_constant[0] = 0x01;

    for _ in 0..iterations {
        let previous = &keys[keys.len() - 1];

        let mut word = previous.column(dimens - 1)?;
        word.rotate_left(1);
        word.iter_mut().for_each(|byte| *byte = tables.substitute(*byte));
        let word = xor_block(&word, &round_constant)?;

        let mut generator = xor_block(&previous.column(0)?, &word)?;
        let mut round_bytes = Vec::with_capacity(previous.size());
        round_bytes.extend_from_slice(&generator);
        for col in 1..dimens {
            generator = xor_block(&generator, &previous.column(col)?)?;
            round_bytes.extend_from_slice(&generator);
        }

        keys.push(StateArray::from_bytes(&round_bytes)?);
        round_constant[0] = multiply(0x02, round_constant[0]);
    }

    assert_eq!(
        keys.len(),
        iterations + 1,
        "key expansion produced a malformed schedule"
    );

    Ok(RoundKeys(keys))
}

/// Runs the forward round pipeline over `state` in place.
pub fn encipher(state: &mut StateArray, round_keys: &RoundKeys) -> Result<()> {
    let tables = tables()?;
    let iterations = round_keys.iterations();

    add_round_key(state, round_keys.get(0))?;

    for round in 1..iterations {
        sub_bytes(state, tables)?;
        shift_rows(state)?;
        mix_columns(state)?;
        add_round_key(state, round_keys.get(round))?;
    }

    sub_bytes(state, tables)?;
    shift_rows(state)?;
    add_round_key(state, round_keys.get(iterations))
}

/// Runs the inverse round pipeline over `state` in place.
pub fn decipher(state: &mut StateArray, round_keys: &RoundKeys) -> Result<()> {
    let tables = tables()?;
    let iterations = round_keys.iterations();

    add_round_key(state, round_keys.get(iterations))?;

    for round in (1..iterations).rev() {
        inv_shift_rows(state)?;
        inv_sub_bytes(state, tables)?;
        add_round_key(state, round_keys.get(round))?;
        inv_mix_columns(state)?;
    }

    inv_shift_rows(state)?;
    inv_sub_bytes(state, tables)?;
    add_round_key(state, round_keys.get(0))
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Result<Block> {
    let mut state = StateArray::from_bytes(block)?;
    encipher(&mut state, round_keys)?;
    Ok(into_block(&state))
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Result<Block> {
    let mut state = StateArray::from_bytes(block)?;
    decipher(&mut state, round_keys)?;
    Ok(into_block(&state))
}

fn into_block(state: &StateArray) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    out.copy_from_slice(&state.to_buffer());
    out
}
