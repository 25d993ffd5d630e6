//! Fixed prompt constants for the honeypot classifier.
//!
//! The prompt content is an external contract shared with the model vendors:
//! the rule numbering below is what the extracted reason codes refer to, so
//! it is embedded verbatim and is not configurable per call.

/// Marker line separating the model's free-form justification from the
/// decision line. Everything after the first non-empty line following this
/// marker is ignored by the extractor.
pub const FINAL_RESPONSE_MARKER: &str = "Final Response:";

/// System instruction: the enumerated honeypot heuristics. The model is told
/// to answer only with 是 ("yes") plus rule numbers, or 否 ("no").
pub const SYSTEM_PROMPT: &str = "你是一个erc20 honeypot分析师,擅长分析erc20合约的代码,并判断是否为honeypot。判断的依据如下: \
1. transferFrom调用了恶意函数,或者调用的approve函数被改成了恶意函数,使得owner、taxwallet、dev,_deadAddr等特权地址可以调整其他交易者的allowance,如果可以设置,则是。 \
2. 除了transferFrom和approve这种合理修改allowance的函数之外,还有没有其他的伪装函数可以修改allowance,如果有,则是。 \
3. 是否可以修改其他用户的balance(从合约里提取代币到dev不算),如果可以修改,则是。 \
4. 在transferFrom函数中,是否存在特权地址(如owner、taxwallet、dev、_deadAddr等)可以绕过allowance的检查,如果有,则是。 \
5. renounceOwnership函数是否被篡改的和renounce无关(如果除了正常renounce之外还有转出余额的操作没有关系,不是honeypot),如果被篡改,则是。 \
6. 调税机制是否允许往大于50的方向调整,如果可以调整,则是。 \
7. 在卖出的时候,是否有调用了某些函数用来累计当前token的买入量并在超过一定数量后就不允许散户卖出(忽略每个块只有3次即以上卖出的情况,只考虑针对当前累积买入量来做限制),如果有,则是。";

/// Prefix for the user turn; the contract source code is appended.
const USER_PROMPT_PREFIX: &str =
    "请根据判断依据分析以下合约代码,判断是否为honeypot,结果只需要说是+上述依据的标号或者否，不用说别的！:";

/// Build the user turn embedding the contract source code.
pub fn build_user_prompt(source_code: &str) -> String {
    format!("{}{}", USER_PROMPT_PREFIX, source_code)
}
