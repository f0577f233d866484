//! 内置游戏规则

use super::RuleEntry;

/// 内置规则（按朗读顺序）
pub fn builtin_rules() -> Vec<RuleEntry> {
    vec![
        RuleEntry::new(
            "أولاً:",
            "يبدأ جميع اللاعبين من خانة البداية، ويقوم كل لاعب برمي النرد للتحرّك على اللوح.",
        ),
        RuleEntry::new(
            "ثانياً:",
            "إذا وقف اللاعب على خانة أرقام، فلا يحدث أي شيء.",
        ),
        RuleEntry::new(
            "ثالثاً:",
            "إذا وقف اللاعب على خانة نقش، يسحب كرت من كروت النقوش، ويستخدم العدسة لرؤية النقشة. إذا نجح في حل الهِنت أو التلميح يحتفظ بالكرت، أما إذا لم يتمكّن من الحل فيسحب كرت عقوبة.",
        ),
        RuleEntry::new(
            "رابعاً:",
            "إذا وقف اللاعب على خانة معالم أو أشكال، يسحب كرت من كروت التحديات، وهي عبارة عن أسئلة عن العلا. إذا أجاب بشكل صحيح يبقى في مكانه، وإذا أخطأ يسحب كرت عقوبات.",
        ),
        RuleEntry::new(
            "خامساً:",
            "إذا وقف اللاعب على خانة شخصيات، يدخل إلى الساحة الخاصة بالشخصية، ولا يمكنه الخروج منها إلا إذا رمى نردًا بأرقام متشابهة — مثل ٤ و٤. وفي بعض الحالات يمكنه التقدّم عدة خانات إضافية عبر مسار خاص يشبه السلم (مثل الانتقال من ٧ إلى ١١).",
        ),
        RuleEntry::new(
            "الفائز:",
            "في نهاية اللعب، الفائز هو اللاعب الذي يجمع أكبر عدد من النقوش المفكوكة.",
        ),
    ]
}
